use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Category;

/// A spending limit for one category.
///
/// The category is the sole key; there is never more than one budget per
/// category. The spent figure is not stored here; it is derived from the
/// transaction store on every read so it cannot drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub category: Category,
    pub limit: Decimal,
    /// Fraction of `limit` (0–1) at which the warning alert fires.
    pub warning_threshold: Decimal,
}

impl Budget {
    pub fn new(category: Category, limit: Decimal, warning_threshold: Decimal) -> Self {
        Self {
            category,
            limit,
            warning_threshold,
        }
    }
}
