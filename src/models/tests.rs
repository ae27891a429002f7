#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── Transaction ───────────────────────────────────────────────

fn make_txn(kind: TxnKind, amount: Decimal) -> Transaction {
    Transaction {
        id: 1,
        amount,
        description: "Test".into(),
        category: Category::Groceries,
        kind,
        date: "2024-01-15".into(),
        merchant: None,
        sync: SyncState::Local,
    }
}

#[test]
fn test_income() {
    let txn = make_txn(TxnKind::Income, dec!(100.00));
    assert!(txn.is_income());
    assert!(!txn.is_expense());
    assert_eq!(txn.signed_amount(), dec!(100.00));
}

#[test]
fn test_expense() {
    let txn = make_txn(TxnKind::Expense, dec!(50.00));
    assert!(txn.is_expense());
    assert!(!txn.is_income());
    assert_eq!(txn.signed_amount(), dec!(-50.00));
}

#[test]
fn test_txn_kind_roundtrip() {
    for kind in [TxnKind::Income, TxnKind::Expense] {
        assert_eq!(TxnKind::parse(kind.as_str()), Some(kind));
    }
    assert_eq!(TxnKind::parse("transfer"), None);
}

#[test]
fn test_transaction_json_uses_camel_case() {
    let txn = make_txn(TxnKind::Expense, dec!(4.50));
    let json = serde_json::to_string(&txn).unwrap();
    assert!(json.contains("\"category\":\"groceries\""));
    assert!(json.contains("\"kind\":\"expense\""));
    // merchant is omitted when absent
    assert!(!json.contains("merchant"));
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_parse() {
    assert_eq!(Category::parse("groceries"), Category::Groceries);
    assert_eq!(Category::parse("GROCERIES"), Category::Groceries);
    assert_eq!(Category::parse("dining out"), Category::DiningOut);
    assert_eq!(Category::parse("dining_out"), Category::DiningOut);
    assert_eq!(Category::parse("rent"), Category::Housing);
    assert_eq!(Category::parse("income"), Category::Salary);
    assert_eq!(Category::parse("what is this"), Category::Other);
}

#[test]
fn test_category_key_roundtrip() {
    // Every category should roundtrip through key -> parse
    for cat in Category::all() {
        assert_eq!(Category::parse(cat.key()), *cat, "roundtrip failed for {cat}");
    }
}

#[test]
fn test_category_display() {
    assert_eq!(format!("{}", Category::DiningOut), "Dining Out");
    assert_eq!(format!("{}", Category::Housing), "Housing");
}

// ── Budget ────────────────────────────────────────────────────

#[test]
fn test_budget_new() {
    let budget = Budget::new(Category::Groceries, dec!(500), dec!(0.8));
    assert_eq!(budget.category, Category::Groceries);
    assert_eq!(budget.limit, dec!(500));
    assert_eq!(budget.warning_threshold, dec!(0.8));
}

// ── Notification ──────────────────────────────────────────────

#[test]
fn test_notification_new_is_unread() {
    let n = Notification::new(7, NotificationKind::Warning, "heads up".into());
    assert_eq!(n.id, 7);
    assert!(!n.is_read);
    assert!(!n.timestamp.is_empty());
}

// ── Recurring templates ───────────────────────────────────────

fn make_template(recurrence: Recurrence, day: Option<u32>, next_due: &str) -> RecurringTemplate {
    RecurringTemplate {
        id: 1,
        name: "Rent".into(),
        amount: dec!(1200),
        category: Category::Housing,
        kind: TxnKind::Expense,
        recurrence,
        recurrence_day: day,
        next_due: next_due.into(),
        is_active: true,
        auto_execute: true,
        notify: true,
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_template_due() {
    let t = make_template(Recurrence::Monthly, Some(1), "2024-02-01");
    assert!(t.is_due(date("2024-02-01")));
    assert!(t.is_due(date("2024-02-15")));
    assert!(!t.is_due(date("2024-01-31")));
}

#[test]
fn test_template_bad_date_never_due() {
    let t = make_template(Recurrence::Daily, None, "not-a-date");
    assert!(!t.is_due(date("2024-02-01")));
}

#[test]
fn test_advance_daily_weekly() {
    let t = make_template(Recurrence::Daily, None, "2024-01-31");
    assert_eq!(t.advance_from(date("2024-01-31")), Some(date("2024-02-01")));

    let t = make_template(Recurrence::Weekly, None, "2024-01-29");
    assert_eq!(t.advance_from(date("2024-01-29")), Some(date("2024-02-05")));
}

#[test]
fn test_advance_monthly_clamps_short_months() {
    // Day 31 templates land on the last day of shorter months
    let t = make_template(Recurrence::Monthly, Some(31), "2024-01-31");
    assert_eq!(t.advance_from(date("2024-01-31")), Some(date("2024-02-29")));

    let t = make_template(Recurrence::Monthly, Some(31), "2023-01-31");
    assert_eq!(t.advance_from(date("2023-01-31")), Some(date("2023-02-28")));
}

#[test]
fn test_advance_monthly_restores_recurrence_day() {
    // After clamping to Feb 29, the following month returns to day 31
    let t = make_template(Recurrence::Monthly, Some(31), "2024-02-29");
    assert_eq!(t.advance_from(date("2024-02-29")), Some(date("2024-03-31")));
}

#[test]
fn test_advance_yearly() {
    let t = make_template(Recurrence::Yearly, Some(15), "2024-06-15");
    assert_eq!(t.advance_from(date("2024-06-15")), Some(date("2025-06-15")));
}

#[test]
fn test_recurrence_parse() {
    assert_eq!(Recurrence::parse("monthly"), Some(Recurrence::Monthly));
    assert_eq!(Recurrence::parse("ANNUAL"), Some(Recurrence::Yearly));
    assert_eq!(Recurrence::parse("fortnightly"), None);
}
