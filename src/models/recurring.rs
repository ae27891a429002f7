use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Category, TxnKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" | "annual" | "annually" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A template for a transaction that repeats on a schedule.
///
/// Nothing materializes these automatically; the "run due" operation is the
/// only thing that turns a due template into a real transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTemplate {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub category: Category,
    pub kind: TxnKind,
    pub recurrence: Recurrence,
    /// Day of month for monthly/yearly templates; ignored otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_day: Option<u32>,
    /// Format: "YYYY-MM-DD"
    pub next_due: String,
    pub is_active: bool,
    pub auto_execute: bool,
    pub notify: bool,
}

impl RecurringTemplate {
    pub fn is_due(&self, today: NaiveDate) -> bool {
        match NaiveDate::parse_from_str(&self.next_due, "%Y-%m-%d") {
            Ok(due) => due <= today,
            Err(_) => false,
        }
    }

    /// The due date that follows `from`, honoring `recurrence_day` for
    /// monthly and yearly schedules (clamped to short months).
    pub fn advance_from(&self, from: NaiveDate) -> Option<NaiveDate> {
        let next = match self.recurrence {
            Recurrence::Daily => from.checked_add_days(Days::new(1))?,
            Recurrence::Weekly => from.checked_add_days(Days::new(7))?,
            Recurrence::Monthly => from.checked_add_months(Months::new(1))?,
            Recurrence::Yearly => from.checked_add_months(Months::new(12))?,
        };

        match (self.recurrence, self.recurrence_day) {
            (Recurrence::Monthly | Recurrence::Yearly, Some(day)) => {
                let clamped = day.min(days_in_month(next.year(), next.month()));
                NaiveDate::from_ymd_opt(next.year(), next.month(), clamped)
            }
            _ => Some(next),
        }
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next_month = first.and_then(|d| d.checked_add_months(Months::new(1)));
    match (first, next_month) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        _ => 28,
    }
}
