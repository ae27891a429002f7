mod budget;
mod category;
mod notification;
mod recurring;
mod transaction;

pub use budget::Budget;
pub use category::Category;
pub use notification::{Notification, NotificationKind};
pub use recurring::{Recurrence, RecurringTemplate};
pub use transaction::{SyncState, Transaction, TxnKind};

#[cfg(test)]
mod tests;
