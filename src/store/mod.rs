use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    Budget, Category, Notification, NotificationKind, RecurringTemplate, SyncState, Transaction,
    TxnKind,
};
use crate::persist::{load_snapshot, save_snapshot, Snapshot, StorageBackend};

pub mod alert;

pub use alert::{evaluate, BudgetStatus};

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("No transaction with id {0}")]
    TransactionNotFound(i64),
    #[error("No budget for category {0}")]
    BudgetNotFound(Category),
    #[error("No notification with id {0}")]
    NotificationNotFound(i64),
    #[error("No recurring template with id {0}")]
    TemplateNotFound(i64),
}

/// User preferences persisted alongside the data.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub dark_mode: bool,
    pub notifications_enabled: bool,
    pub amount_hidden: bool,
}

/// One row of the budget overview: the stored budget plus figures derived
/// from the transaction list at read time.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLine {
    pub category: Category,
    pub limit: Decimal,
    pub warning_threshold: Decimal,
    pub spent: Decimal,
    pub status: BudgetStatus,
}

/// The single owner of all application state.
///
/// Every mutating method writes the full snapshot back through the storage
/// backend before returning. Storage failures are logged and swallowed, so
/// mutations always complete in memory.
pub struct LedgerStore {
    storage: Box<dyn StorageBackend>,
    pub settings: Settings,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    notifications: Vec<Notification>,
    templates: Vec<RecurringTemplate>,
    next_id: i64,
}

impl LedgerStore {
    /// Load state from the backend. Missing or corrupt data starts empty.
    pub fn open(storage: Box<dyn StorageBackend>) -> Self {
        let snapshot = load_snapshot(storage.as_ref());
        let mut store = Self {
            storage,
            settings: Settings {
                dark_mode: snapshot.dark_mode,
                notifications_enabled: snapshot.notifications_enabled,
                amount_hidden: snapshot.amount_hidden.unwrap_or(false),
            },
            transactions: snapshot.transactions,
            budgets: snapshot.budgets,
            notifications: Vec::new(),
            templates: snapshot.recurring_templates,
            next_id: Utc::now().timestamp_millis(),
        };
        // Ids are timestamp-derived; stay ahead of anything already stored.
        let max_seen = store
            .transactions
            .iter()
            .map(|t| t.id)
            .chain(store.templates.iter().map(|t| t.id))
            .max()
            .unwrap_or(0);
        store.next_id = store.next_id.max(max_seen + 1);
        store
    }

    /// Hand the backend back, e.g. to reopen the store.
    pub fn into_storage(self) -> Box<dyn StorageBackend> {
        self.storage
    }

    fn take_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn persist(&mut self) {
        let snapshot = Snapshot {
            dark_mode: self.settings.dark_mode,
            notifications_enabled: self.settings.notifications_enabled,
            amount_hidden: if self.settings.amount_hidden {
                Some(true)
            } else {
                None
            },
            transactions: self.transactions.clone(),
            budgets: self.budgets.clone(),
            recurring_templates: self.templates.clone(),
        };
        save_snapshot(self.storage.as_mut(), &snapshot);
    }

    // ── Transactions ──────────────────────────────────────────────

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn find_transaction(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Append a transaction, assigning an id when the caller left it zero.
    /// Expenses are checked against the category's budget; crossing the
    /// warning threshold or the limit appends exactly one notification.
    pub fn add_transaction(&mut self, mut txn: Transaction) -> i64 {
        if txn.id == 0 {
            txn.id = self.take_id();
        } else {
            self.next_id = self.next_id.max(txn.id + 1);
        }
        let id = txn.id;
        let category = txn.category;
        let is_expense = txn.is_expense();
        self.transactions.push(txn);

        if is_expense {
            self.check_budget_alert(category);
        }
        self.persist();
        id
    }

    /// Replace the transaction with a matching id.
    pub fn update_transaction(&mut self, txn: Transaction) -> Result<(), StoreError> {
        let slot = self
            .transactions
            .iter_mut()
            .find(|t| t.id == txn.id)
            .ok_or(StoreError::TransactionNotFound(txn.id))?;
        *slot = txn;
        self.persist();
        Ok(())
    }

    pub fn remove_transaction(&mut self, id: i64) -> Result<Transaction, StoreError> {
        let pos = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::TransactionNotFound(id))?;
        let removed = self.transactions.remove(pos);
        self.persist();
        Ok(removed)
    }

    pub fn set_transaction_sync(&mut self, id: i64, sync: SyncState) -> Result<(), StoreError> {
        let slot = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::TransactionNotFound(id))?;
        slot.sync = sync;
        self.persist();
        Ok(())
    }

    /// Total spent in a category across all expense transactions.
    pub fn spent_for(&self, category: Category) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.category == category && t.is_expense())
            .map(|t| t.amount)
            .sum()
    }

    /// Income and expense totals for one calendar month.
    pub fn monthly_totals(&self, year: i32, month: u32) -> (Decimal, Decimal) {
        let prefix = format!("{year:04}-{month:02}");
        let mut income = Decimal::ZERO;
        let mut expense = Decimal::ZERO;
        for txn in self.transactions.iter().filter(|t| t.date.starts_with(&prefix)) {
            match txn.kind {
                TxnKind::Income => income += txn.amount,
                TxnKind::Expense => expense += txn.amount,
            }
        }
        (income, expense)
    }

    /// Expense totals per category for one calendar month, largest first.
    pub fn spending_by_category(&self, year: i32, month: u32) -> Vec<(Category, Decimal)> {
        let prefix = format!("{year:04}-{month:02}");
        let mut totals: Vec<(Category, Decimal)> = Vec::new();
        for txn in self
            .transactions
            .iter()
            .filter(|t| t.is_expense() && t.date.starts_with(&prefix))
        {
            match totals.iter_mut().find(|(c, _)| *c == txn.category) {
                Some((_, total)) => *total += txn.amount,
                None => totals.push((txn.category, txn.amount)),
            }
        }
        totals.sort_by(|a, b| b.1.cmp(&a.1));
        totals
    }

    // ── Budgets ───────────────────────────────────────────────────

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn find_budget(&self, category: Category) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.category == category)
    }

    /// Replace the budget for the category, or append one. Category is the
    /// sole key; there is never more than one budget per category.
    pub fn upsert_budget(&mut self, budget: Budget) {
        match self.budgets.iter_mut().find(|b| b.category == budget.category) {
            Some(slot) => *slot = budget,
            None => self.budgets.push(budget),
        }
        self.persist();
    }

    pub fn remove_budget(&mut self, category: Category) -> Result<(), StoreError> {
        let pos = self
            .budgets
            .iter()
            .position(|b| b.category == category)
            .ok_or(StoreError::BudgetNotFound(category))?;
        self.budgets.remove(pos);
        self.persist();
        Ok(())
    }

    /// Every budget with its derived spent figure and alert status.
    pub fn budget_overview(&self) -> Vec<BudgetLine> {
        self.budgets
            .iter()
            .map(|b| {
                let spent = self.spent_for(b.category);
                BudgetLine {
                    category: b.category,
                    limit: b.limit,
                    warning_threshold: b.warning_threshold,
                    spent,
                    status: evaluate(spent, b.limit, b.warning_threshold),
                }
            })
            .collect()
    }

    fn check_budget_alert(&mut self, category: Category) {
        let Some(budget) = self.find_budget(category) else {
            return;
        };
        let spent = self.spent_for(category);
        let (kind, message) = match evaluate(spent, budget.limit, budget.warning_threshold) {
            BudgetStatus::Danger => (
                NotificationKind::Error,
                format!(
                    "Budget exceeded for {category}: ${spent:.2} of ${:.2} spent",
                    budget.limit
                ),
            ),
            BudgetStatus::Warning => (
                NotificationKind::Warning,
                format!(
                    "Approaching budget for {category}: ${spent:.2} of ${:.2} spent",
                    budget.limit
                ),
            ),
            BudgetStatus::Ok => return,
        };
        if self.settings.notifications_enabled {
            let id = self.take_id();
            self.notifications.push(Notification::new(id, kind, message));
        }
    }

    // ── Notifications ─────────────────────────────────────────────

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn push_notification(&mut self, kind: NotificationKind, message: String) -> i64 {
        let id = self.take_id();
        self.notifications.push(Notification::new(id, kind, message));
        id
    }

    pub fn mark_notification_read(&mut self, id: i64) -> Result<(), StoreError> {
        let slot = self
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StoreError::NotificationNotFound(id))?;
        slot.is_read = true;
        Ok(())
    }

    pub fn mark_all_notifications_read(&mut self) {
        for n in &mut self.notifications {
            n.is_read = true;
        }
    }

    pub fn remove_notification(&mut self, id: i64) -> Result<(), StoreError> {
        let pos = self
            .notifications
            .iter()
            .position(|n| n.id == id)
            .ok_or(StoreError::NotificationNotFound(id))?;
        self.notifications.remove(pos);
        Ok(())
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    // ── Recurring templates ───────────────────────────────────────

    pub fn templates(&self) -> &[RecurringTemplate] {
        &self.templates
    }

    pub fn upsert_template(&mut self, mut template: RecurringTemplate) -> i64 {
        if template.id == 0 {
            template.id = self.take_id();
        }
        let id = template.id;
        match self.templates.iter_mut().find(|t| t.id == id) {
            Some(slot) => *slot = template,
            None => self.templates.push(template),
        }
        self.persist();
        id
    }

    pub fn remove_template(&mut self, id: i64) -> Result<(), StoreError> {
        let pos = self
            .templates
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::TemplateNotFound(id))?;
        self.templates.remove(pos);
        self.persist();
        Ok(())
    }

    /// Materialize every due occurrence of every active template, advancing
    /// each template's due date past `today`. Returns the ids of the created
    /// transactions. Templates are never run by a background job; this is
    /// the only path that turns a template into a transaction.
    pub fn run_due_templates(&mut self, today: NaiveDate) -> Vec<i64> {
        let mut created = Vec::new();
        let mut changed = false;
        for idx in 0..self.templates.len() {
            loop {
                let template = self.templates[idx].clone();
                if !template.is_active || !template.is_due(today) {
                    break;
                }
                let Ok(due) = NaiveDate::parse_from_str(&template.next_due, "%Y-%m-%d") else {
                    break;
                };
                let Some(next) = template.advance_from(due) else {
                    break;
                };

                if template.auto_execute {
                    let txn = Transaction {
                        id: self.take_id(),
                        amount: template.amount,
                        description: template.name.clone(),
                        category: template.category,
                        kind: template.kind,
                        date: due.format("%Y-%m-%d").to_string(),
                        merchant: None,
                        sync: SyncState::Local,
                    };
                    let id = txn.id;
                    let category = txn.category;
                    let is_expense = txn.is_expense();
                    self.transactions.push(txn);
                    if is_expense {
                        self.check_budget_alert(category);
                    }
                    created.push(id);
                } else if template.notify && self.settings.notifications_enabled {
                    let id = self.take_id();
                    self.notifications.push(Notification::new(
                        id,
                        NotificationKind::Info,
                        format!("Recurring item due: {} ({due})", template.name),
                    ));
                }
                self.templates[idx].next_due = next.format("%Y-%m-%d").to_string();
                changed = true;
            }
        }
        if changed {
            self.persist();
        }
        created
    }

    // ── Settings ──────────────────────────────────────────────────

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.settings.dark_mode = !self.settings.dark_mode;
        self.persist();
        self.settings.dark_mode
    }

    pub fn toggle_notifications(&mut self) -> bool {
        self.settings.notifications_enabled = !self.settings.notifications_enabled;
        self.persist();
        self.settings.notifications_enabled
    }

    pub fn toggle_amount_hidden(&mut self) -> bool {
        self.settings.amount_hidden = !self.settings.amount_hidden;
        self.persist();
        self.settings.amount_hidden
    }
}

#[cfg(test)]
mod tests;
