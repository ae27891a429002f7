#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::Recurrence;
use crate::persist::MemoryStorage;

fn new_store() -> LedgerStore {
    LedgerStore::open(Box::new(MemoryStorage::new()))
}

fn expense(amount: Decimal, category: Category, date: &str) -> Transaction {
    Transaction {
        id: 0,
        amount,
        description: "Test expense".into(),
        category,
        kind: TxnKind::Expense,
        date: date.into(),
        merchant: None,
        sync: SyncState::Local,
    }
}

fn income(amount: Decimal, date: &str) -> Transaction {
    Transaction {
        id: 0,
        amount,
        description: "Paycheck".into(),
        category: Category::Salary,
        kind: TxnKind::Income,
        date: date.into(),
        merchant: None,
        sync: SyncState::Local,
    }
}

// ── Alert evaluator ───────────────────────────────────────────

#[test]
fn test_evaluate_warning_boundary_inclusive() {
    assert_eq!(
        evaluate(dec!(800), dec!(1000), dec!(0.8)),
        BudgetStatus::Warning
    );
}

#[test]
fn test_evaluate_danger_at_limit() {
    assert_eq!(
        evaluate(dec!(1000), dec!(1000), dec!(0.8)),
        BudgetStatus::Danger
    );
}

#[test]
fn test_evaluate_ok_below_threshold() {
    assert_eq!(evaluate(dec!(500), dec!(1000), dec!(0.8)), BudgetStatus::Ok);
}

#[test]
fn test_evaluate_over_limit() {
    assert_eq!(
        evaluate(dec!(1050), dec!(1000), dec!(0.8)),
        BudgetStatus::Danger
    );
}

#[test]
fn test_evaluate_zero_limit_never_alerts() {
    assert_eq!(evaluate(dec!(100), dec!(0), dec!(0.8)), BudgetStatus::Ok);
}

// ── Transactions ──────────────────────────────────────────────

#[test]
fn test_add_and_remove_roundtrip() {
    let mut store = new_store();
    let id = store.add_transaction(expense(dec!(25), Category::Groceries, "2024-01-10"));

    assert_eq!(store.transactions().len(), 1);
    assert_eq!(store.find_transaction(id).unwrap().amount, dec!(25));

    store.remove_transaction(id).unwrap();
    assert!(store.transactions().is_empty());
}

#[test]
fn test_ids_are_unique_and_increasing() {
    let mut store = new_store();
    let a = store.add_transaction(expense(dec!(1), Category::Other, "2024-01-01"));
    let b = store.add_transaction(expense(dec!(2), Category::Other, "2024-01-01"));
    assert!(b > a);
}

#[test]
fn test_update_missing_transaction_errors() {
    let mut store = new_store();
    let err = store
        .update_transaction(expense(dec!(5), Category::Other, "2024-01-01"))
        .unwrap_err();
    assert!(matches!(err, StoreError::TransactionNotFound(_)));
}

#[test]
fn test_remove_missing_transaction_errors() {
    let mut store = new_store();
    assert_eq!(
        store.remove_transaction(99),
        Err(StoreError::TransactionNotFound(99))
    );
}

#[test]
fn test_update_replaces_whole_record() {
    let mut store = new_store();
    let id = store.add_transaction(expense(dec!(30), Category::Groceries, "2024-01-10"));

    let mut edited = store.find_transaction(id).unwrap().clone();
    edited.amount = dec!(35);
    edited.description = "Corrected".into();
    store.update_transaction(edited).unwrap();

    let txn = store.find_transaction(id).unwrap();
    assert_eq!(txn.amount, dec!(35));
    assert_eq!(txn.description, "Corrected");
    assert_eq!(store.transactions().len(), 1);
}

#[test]
fn test_monthly_totals() {
    let mut store = new_store();
    store.add_transaction(income(dec!(2000), "2024-03-01"));
    store.add_transaction(expense(dec!(150), Category::Groceries, "2024-03-05"));
    store.add_transaction(expense(dec!(50), Category::Transport, "2024-03-20"));
    store.add_transaction(expense(dec!(999), Category::Travel, "2024-04-01"));

    let (income, expense) = store.monthly_totals(2024, 3);
    assert_eq!(income, dec!(2000));
    assert_eq!(expense, dec!(200));
}

#[test]
fn test_spending_by_category_sorted_desc() {
    let mut store = new_store();
    store.add_transaction(expense(dec!(40), Category::Transport, "2024-03-02"));
    store.add_transaction(expense(dec!(100), Category::Groceries, "2024-03-05"));
    store.add_transaction(expense(dec!(60), Category::Groceries, "2024-03-09"));

    let by_cat = store.spending_by_category(2024, 3);
    assert_eq!(
        by_cat,
        vec![
            (Category::Groceries, dec!(160)),
            (Category::Transport, dec!(40)),
        ]
    );
}

// ── Budgets ───────────────────────────────────────────────────

#[test]
fn test_upsert_budget_replaces_not_duplicates() {
    let mut store = new_store();
    store.upsert_budget(Budget::new(Category::Groceries, dec!(500), dec!(0.8)));
    store.upsert_budget(Budget::new(Category::Groceries, dec!(600), dec!(0.9)));

    assert_eq!(store.budgets().len(), 1);
    let budget = store.find_budget(Category::Groceries).unwrap();
    assert_eq!(budget.limit, dec!(600));
    assert_eq!(budget.warning_threshold, dec!(0.9));
}

#[test]
fn test_remove_missing_budget_errors() {
    let mut store = new_store();
    assert_eq!(
        store.remove_budget(Category::Travel),
        Err(StoreError::BudgetNotFound(Category::Travel))
    );
}

#[test]
fn test_budget_overview_derives_spent() {
    let mut store = new_store();
    store.upsert_budget(Budget::new(Category::Groceries, dec!(1000), dec!(0.8)));
    store.add_transaction(expense(dec!(300), Category::Groceries, "2024-03-01"));
    store.add_transaction(expense(dec!(200), Category::Groceries, "2024-03-15"));
    // income in the same category never counts as spending
    store.add_transaction(income(dec!(50), "2024-03-20"));

    let overview = store.budget_overview();
    assert_eq!(overview.len(), 1);
    assert_eq!(overview[0].spent, dec!(500));
    assert_eq!(overview[0].status, BudgetStatus::Ok);
}

#[test]
fn test_spent_recomputed_after_delete() {
    let mut store = new_store();
    store.upsert_budget(Budget::new(Category::Groceries, dec!(1000), dec!(0.8)));
    let id = store.add_transaction(expense(dec!(400), Category::Groceries, "2024-03-01"));
    store.remove_transaction(id).unwrap();

    assert_eq!(store.budget_overview()[0].spent, dec!(0));
}

// ── Alerts on insert ──────────────────────────────────────────

#[test]
fn test_expense_crossing_limit_appends_one_error_notification() {
    let mut store = new_store();
    store.upsert_budget(Budget::new(Category::Groceries, dec!(1000), dec!(0.8)));
    store.add_transaction(expense(dec!(750), Category::Groceries, "2024-03-01"));
    // 750 < 800 threshold, no alert yet
    assert_eq!(store.notifications().len(), 0);

    store.add_transaction(expense(dec!(300), Category::Groceries, "2024-03-02"));

    let overview = store.budget_overview();
    assert_eq!(overview[0].spent, dec!(1050));
    assert_eq!(overview[0].status, BudgetStatus::Danger);

    assert_eq!(store.notifications().len(), 1);
    let alert = &store.notifications()[0];
    assert_eq!(alert.kind, NotificationKind::Error);
    assert!(alert.message.contains("1050.00"), "{}", alert.message);
    assert!(alert.message.contains("1000.00"), "{}", alert.message);
}

#[test]
fn test_expense_crossing_threshold_appends_warning() {
    let mut store = new_store();
    store.upsert_budget(Budget::new(Category::Groceries, dec!(1000), dec!(0.8)));
    store.add_transaction(expense(dec!(800), Category::Groceries, "2024-03-01"));

    assert_eq!(store.notifications().len(), 1);
    assert_eq!(store.notifications()[0].kind, NotificationKind::Warning);
}

#[test]
fn test_no_alert_without_budget() {
    let mut store = new_store();
    store.add_transaction(expense(dec!(9999), Category::Travel, "2024-03-01"));
    assert!(store.notifications().is_empty());
}

#[test]
fn test_income_never_alerts() {
    let mut store = new_store();
    store.upsert_budget(Budget::new(Category::Salary, dec!(10), dec!(0.5)));
    store.add_transaction(income(dec!(5000), "2024-03-01"));
    assert!(store.notifications().is_empty());
}

#[test]
fn test_notifications_disabled_suppresses_alerts() {
    let mut store = new_store();
    store.toggle_notifications();
    assert!(!store.settings.notifications_enabled);

    store.upsert_budget(Budget::new(Category::Groceries, dec!(100), dec!(0.8)));
    store.add_transaction(expense(dec!(500), Category::Groceries, "2024-03-01"));
    assert!(store.notifications().is_empty());
}

// ── Notifications ─────────────────────────────────────────────

#[test]
fn test_notification_read_and_remove() {
    let mut store = new_store();
    let id = store.push_notification(NotificationKind::Info, "hello".into());
    assert_eq!(store.unread_count(), 1);

    store.mark_notification_read(id).unwrap();
    assert_eq!(store.unread_count(), 0);

    store.remove_notification(id).unwrap();
    assert!(store.notifications().is_empty());
    assert_eq!(
        store.remove_notification(id),
        Err(StoreError::NotificationNotFound(id))
    );
}

// ── Recurring templates ───────────────────────────────────────

fn rent_template(next_due: &str, auto_execute: bool) -> RecurringTemplate {
    RecurringTemplate {
        id: 0,
        name: "Rent".into(),
        amount: dec!(1200),
        category: Category::Housing,
        kind: TxnKind::Expense,
        recurrence: Recurrence::Monthly,
        recurrence_day: Some(1),
        next_due: next_due.into(),
        is_active: true,
        auto_execute,
        notify: true,
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_run_due_materializes_each_missed_occurrence() {
    let mut store = new_store();
    store.upsert_template(rent_template("2024-01-01", true));

    let created = store.run_due_templates(date("2024-03-15"));
    // Jan, Feb, Mar were all due
    assert_eq!(created.len(), 3);
    assert_eq!(store.transactions().len(), 3);
    assert_eq!(store.templates()[0].next_due, "2024-04-01");

    // running again does nothing
    assert!(store.run_due_templates(date("2024-03-15")).is_empty());
    assert_eq!(store.transactions().len(), 3);
}

#[test]
fn test_run_due_skips_inactive() {
    let mut store = new_store();
    let mut template = rent_template("2024-01-01", true);
    template.is_active = false;
    store.upsert_template(template);

    assert!(store.run_due_templates(date("2024-03-15")).is_empty());
    assert!(store.transactions().is_empty());
}

#[test]
fn test_run_due_notify_only_template() {
    let mut store = new_store();
    store.upsert_template(rent_template("2024-03-01", false));

    let created = store.run_due_templates(date("2024-03-01"));
    assert!(created.is_empty());
    assert!(store.transactions().is_empty());
    assert_eq!(store.notifications().len(), 1);
    assert_eq!(store.notifications()[0].kind, NotificationKind::Info);
    assert_eq!(store.templates()[0].next_due, "2024-04-01");
}

#[test]
fn test_remove_missing_template_errors() {
    let mut store = new_store();
    assert_eq!(
        store.remove_template(5),
        Err(StoreError::TemplateNotFound(5))
    );
}

// ── Persistence through the store ─────────────────────────────

#[test]
fn test_state_survives_reopen() {
    let mut store = LedgerStore::open(Box::new(MemoryStorage::new()));
    store.upsert_budget(Budget::new(Category::Groceries, dec!(500), dec!(0.8)));
    store.add_transaction(expense(dec!(120), Category::Groceries, "2024-03-01"));
    store.toggle_dark_mode();

    let store = LedgerStore::open(store.into_storage());
    assert_eq!(store.transactions().len(), 1);
    assert_eq!(store.budgets().len(), 1);
    assert_eq!(store.transactions()[0].amount, dec!(120));
    assert!(!store.settings.dark_mode);
}
