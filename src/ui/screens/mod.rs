pub(crate) mod budgets;
pub(crate) mod dashboard;
pub(crate) mod notifications;
pub(crate) mod recurring;
pub(crate) mod transactions;
