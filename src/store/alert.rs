use rust_decimal::Decimal;

/// Where spending sits relative to a budget's limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Ok,
    Warning,
    Danger,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify spending against a limit. Both boundaries are inclusive: spending
/// exactly at the warning threshold is a warning, exactly at the limit is
/// danger. A non-positive limit never alerts.
pub fn evaluate(spent: Decimal, limit: Decimal, warning_threshold: Decimal) -> BudgetStatus {
    if limit <= Decimal::ZERO {
        return BudgetStatus::Ok;
    }
    if spent >= limit {
        BudgetStatus::Danger
    } else if spent >= limit * warning_threshold {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Ok
    }
}
