use chrono::{Datelike, Local};
use rust_decimal::Decimal;

use super::theme::Theme;
use crate::models::{Category, Notification, RecurringTemplate, Transaction};
use crate::store::{BudgetLine, LedgerStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Budgets,
    Recurring,
    Notifications,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Transactions,
            Self::Budgets,
            Self::Recurring,
            Self::Notifications,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Budgets => write!(f, "Budgets"),
            Self::Recurring => write!(f, "Recurring"),
            Self::Notifications => write!(f, "Notifications"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: i64, description: String },
    DeleteBudget { category: Category },
    DeleteTemplate { id: i64, name: String },
    RunDueTemplates,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    /// Format: "YYYY-MM"
    pub(crate) current_month: String,
    pub(crate) has_remote: bool,
    pub(crate) amount_hidden: bool,

    // Dashboard
    pub(crate) monthly_income: Decimal,
    pub(crate) monthly_expenses: Decimal,
    pub(crate) spending_by_category: Vec<(Category, Decimal)>,

    // Transactions (filtered view, newest first)
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,
    pub(crate) transaction_count: usize,

    // Budgets
    pub(crate) budgets: Vec<BudgetLine>,
    pub(crate) budget_index: usize,

    // Recurring templates
    pub(crate) templates: Vec<RecurringTemplate>,
    pub(crate) template_index: usize,

    // Notifications
    pub(crate) notifications: Vec<Notification>,
    pub(crate) notification_index: usize,
    pub(crate) unread_count: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,

    pub(crate) theme: Theme,
}

impl App {
    pub(crate) fn new(store: &LedgerStore, has_remote: bool) -> Self {
        let current_month = Local::now().format("%Y-%m").to_string();

        let mut app = Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            status_message: String::new(),
            show_help: false,
            current_month,
            has_remote,
            amount_hidden: store.settings.amount_hidden,

            monthly_income: Decimal::ZERO,
            monthly_expenses: Decimal::ZERO,
            spending_by_category: Vec::new(),

            transactions: Vec::new(),
            transaction_index: 0,
            transaction_scroll: 0,
            transaction_count: 0,

            budgets: Vec::new(),
            budget_index: 0,

            templates: Vec::new(),
            template_index: 0,

            notifications: Vec::new(),
            notification_index: 0,
            unread_count: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,

            theme: Theme::new(store.settings.dark_mode),
        };
        app.refresh_all(store);
        app
    }

    /// (year, month) parsed from `current_month`, falling back to today.
    pub(crate) fn month_parts(&self) -> (i32, u32) {
        let mut parts = self.current_month.splitn(2, '-');
        let year = parts.next().and_then(|y| y.parse().ok());
        let month = parts.next().and_then(|m| m.parse().ok());
        match (year, month) {
            (Some(y), Some(m)) if (1..=12).contains(&m) => (y, m),
            _ => {
                let now = Local::now();
                (now.year(), now.month())
            }
        }
    }

    pub(crate) fn refresh_dashboard(&mut self, store: &LedgerStore) {
        let (year, month) = self.month_parts();
        let (income, expenses) = store.monthly_totals(year, month);
        self.monthly_income = income;
        self.monthly_expenses = expenses;
        self.spending_by_category = store.spending_by_category(year, month);
        self.refresh_transactions(store);
    }

    /// Current month's transactions, newest first, narrowed by the live
    /// search input when one is set.
    pub(crate) fn refresh_transactions(&mut self, store: &LedgerStore) {
        let prefix = self.current_month.clone();
        let needle = self.search_input.to_lowercase();
        let mut rows: Vec<Transaction> = store
            .transactions()
            .iter()
            .filter(|t| t.date.starts_with(&prefix))
            .filter(|t| {
                needle.is_empty()
                    || t.description.to_lowercase().contains(&needle)
                    || t.merchant
                        .as_deref()
                        .is_some_and(|m| m.to_lowercase().contains(&needle))
                    || t.category.as_str().to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        self.transactions = rows;
        self.transaction_count = store.transactions().len();
        if self.transaction_index >= self.transactions.len() && !self.transactions.is_empty() {
            self.transaction_index = self.transactions.len() - 1;
        }
    }

    pub(crate) fn refresh_budgets(&mut self, store: &LedgerStore) {
        self.budgets = store.budget_overview();
        if self.budget_index >= self.budgets.len() && !self.budgets.is_empty() {
            self.budget_index = self.budgets.len() - 1;
        }
    }

    pub(crate) fn refresh_templates(&mut self, store: &LedgerStore) {
        self.templates = store.templates().to_vec();
        if self.template_index >= self.templates.len() && !self.templates.is_empty() {
            self.template_index = self.templates.len() - 1;
        }
    }

    pub(crate) fn refresh_notifications(&mut self, store: &LedgerStore) {
        self.notifications = store.notifications().to_vec();
        self.notifications.reverse(); // newest first
        self.unread_count = store.unread_count();
        if self.notification_index >= self.notifications.len() && !self.notifications.is_empty() {
            self.notification_index = self.notifications.len() - 1;
        }
    }

    pub(crate) fn refresh_all(&mut self, store: &LedgerStore) {
        self.theme = Theme::new(store.settings.dark_mode);
        self.amount_hidden = store.settings.amount_hidden;
        self.refresh_dashboard(store); // also refreshes transactions
        self.refresh_budgets(store);
        self.refresh_templates(store);
        self.refresh_notifications(store);
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.transaction_index)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
