use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::Datelike;
use rust_decimal::Decimal;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::models::{Budget, Category, Recurrence, RecurringTemplate, SyncState, Transaction, TxnKind};
use crate::session::Session;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Session) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit HomeLedger", cmd_quit, r);
    register_command!("quit", "Quit HomeLedger", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("r", "Go to Recurring", cmd_recurring, r);
    register_command!("recurring", "Go to Recurring", cmd_recurring, r);
    register_command!("n", "Go to Notifications", cmd_notifications, r);
    register_command!("notifications", "Go to Notifications", cmd_notifications, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set month (e.g. :month 2024-01)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 2024-01)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "search",
        "Search transactions (e.g. :search coffee)",
        cmd_search,
        r
    );
    register_command!("s", "Search transactions (e.g. :s coffee)", cmd_search, r);
    register_command!(
        "add-txn",
        "Add transaction (e.g. :add-txn 2024-01-15 Coffee -4.50 dining_out)",
        cmd_add_txn,
        r
    );
    register_command!("rename", "Rename selected transaction", cmd_rename, r);
    register_command!(
        "recat",
        "Re-categorize selected transaction (e.g. :recat groceries)",
        cmd_recat,
        r
    );
    register_command!(
        "delete-txn",
        "Delete selected transaction",
        cmd_delete_txn,
        r
    );
    register_command!(
        "budget",
        "Set budget (e.g. :budget groceries 500 or :budget groceries 500 0.9)",
        cmd_budget,
        r
    );
    register_command!(
        "delete-budget",
        "Delete selected budget",
        cmd_delete_budget,
        r
    );
    register_command!(
        "template",
        "Add recurring template (e.g. :template 2024-02-01 monthly Rent -1200 housing)",
        cmd_template,
        r
    );
    register_command!(
        "delete-template",
        "Delete selected template",
        cmd_delete_template,
        r
    );
    register_command!(
        "toggle-template",
        "Activate/deactivate selected template",
        cmd_toggle_template,
        r
    );
    register_command!(
        "run-due",
        "Materialize all due recurring templates",
        cmd_run_due,
        r
    );
    register_command!("read", "Mark selected notification read", cmd_read, r);
    register_command!("read-all", "Mark all notifications read", cmd_read_all, r);
    register_command!(
        "delete-notification",
        "Delete selected notification",
        cmd_delete_notification,
        r
    );
    register_command!("toggle-dark", "Toggle dark mode", cmd_toggle_dark, r);
    register_command!(
        "toggle-amounts",
        "Hide/show amounts on screen",
        cmd_toggle_amounts,
        r
    );
    register_command!(
        "toggle-notifications",
        "Enable/disable budget alert notifications",
        cmd_toggle_notifications,
        r
    );

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    session: &mut Session,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, session)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k)) // name breaks distance ties
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_dashboard(&session.store);
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    app.refresh_transactions(&session.store);
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    app.refresh_budgets(&session.store);
    Ok(())
}

fn cmd_recurring(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Recurring;
    app.refresh_templates(&session.store);
    Ok(())
}

fn cmd_notifications(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Notifications;
    app.refresh_notifications(&session.store);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :month YYYY-MM (e.g. :month 2024-01)");
        return Ok(());
    }

    // Accept formats like "2024-01", "2024-1", "01", "1"
    let month = if args.len() <= 2 {
        let year = &app.current_month[..4];
        format!("{year}-{args:0>2}")
    } else {
        args.to_string()
    };

    // Validate by parsing as an actual date
    if chrono::NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").is_ok() {
        let m = month[..7].to_string();
        app.set_status(format!("Switched to month: {m}"));
        app.current_month = m;
        app.refresh_dashboard(&session.store);
    } else {
        app.set_status("Invalid month format. Use YYYY-MM (e.g. 2024-01)");
    }

    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    advance_month(app, session, 1)
}

fn cmd_prev_month(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    advance_month(app, session, -1)
}

fn advance_month(app: &mut App, session: &mut Session, delta: i32) -> anyhow::Result<()> {
    let base = format!("{}-01", app.current_month);
    if let Ok(date) = chrono::NaiveDate::parse_from_str(&base, "%Y-%m-%d") {
        let new_date = if delta > 0 {
            date.checked_add_months(chrono::Months::new(1))
        } else {
            date.checked_sub_months(chrono::Months::new(1))
        };

        if let Some(d) = new_date {
            let m = d.format("%Y-%m").to_string();
            app.set_status(format!("Month: {m}"));
            app.current_month = m;
            app.refresh_dashboard(&session.store);
            app.refresh_budgets(&session.store);
        }
    }

    Ok(())
}

fn cmd_search(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    app.search_input = args.to_string();
    app.screen = Screen::Transactions;
    app.refresh_transactions(&session.store);

    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        app.set_status(format!("Searching: {args}"));
    }

    Ok(())
}

fn cmd_add_txn(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    const USAGE: &str =
        "Usage: :add-txn <date> <description> <amount> [category]. Negative amount = expense";
    if args.is_empty() {
        app.set_status(USAGE);
        return Ok(());
    }

    let parts: Vec<&str> = args.splitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status(USAGE);
        return Ok(());
    }

    let date = parts[0];
    if chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        app.set_status(format!("Invalid date: {date}. Use YYYY-MM-DD"));
        return Ok(());
    }

    // The amount (and optional category) trail the description
    let rest = parts[1];
    let tail: Vec<&str> = rest.rsplitn(3, ' ').collect();
    let (description, amount_str, category) = match tail.as_slice() {
        [last, mid, head] if Decimal::from_str(mid).is_ok() => {
            (head.to_string(), *mid, Category::parse(last))
        }
        [last, mid, head] => (format!("{head} {mid}"), *last, Category::Other),
        [last, head] => (head.to_string(), *last, Category::Other),
        _ => {
            app.set_status(USAGE);
            return Ok(());
        }
    };

    let signed = match Decimal::from_str(amount_str) {
        Ok(a) => a,
        Err(_) => {
            app.set_status(format!("Invalid amount: {amount_str}"));
            return Ok(());
        }
    };
    let kind = if signed < Decimal::ZERO {
        TxnKind::Expense
    } else {
        TxnKind::Income
    };

    let txn = Transaction {
        id: 0,
        amount: signed.abs(),
        description: description.clone(),
        category,
        kind,
        date: date.to_string(),
        merchant: None,
        sync: SyncState::Local,
    };
    session.add_transaction(txn);
    app.refresh_all(&session.store);
    app.set_status(format!("Added {kind}: {description} ({category})"));
    Ok(())
}

fn cmd_rename(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions || app.transactions.is_empty() {
        app.set_status("Navigate to Transactions and select one first");
        return Ok(());
    }

    if args.is_empty() {
        // Enter editing mode for inline rename
        if let Some(txn) = app.selected_transaction() {
            app.command_input = txn.description.clone();
            app.input_mode = InputMode::Editing;
            app.set_status("Type new name, press Enter to confirm");
        }
        return Ok(());
    }

    if let Some(txn) = app.selected_transaction() {
        let mut edited = txn.clone();
        edited.description = args.to_string();
        if let Err(e) = session.update_transaction(edited) {
            app.set_status(format!("{e}"));
        } else {
            app.refresh_transactions(&session.store);
            app.set_status(format!("Renamed transaction to: {args}"));
        }
    }

    Ok(())
}

fn cmd_recat(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions || app.transactions.is_empty() {
        app.set_status("Navigate to Transactions and select one first");
        return Ok(());
    }

    if args.is_empty() {
        let keys: Vec<&str> = Category::all().iter().map(|c| c.key()).collect();
        app.set_status(format!("Usage: :recat <category>. One of: {}", keys.join(", ")));
        return Ok(());
    }

    let category = Category::parse(args);
    if let Some(txn) = app.selected_transaction() {
        let mut edited = txn.clone();
        edited.category = category;
        if let Err(e) = session.update_transaction(edited) {
            app.set_status(format!("{e}"));
        } else {
            app.refresh_all(&session.store);
            app.set_status(format!("Categorized as: {category}"));
        }
    }

    Ok(())
}

fn cmd_delete_txn(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions || app.transactions.is_empty() {
        app.set_status("Navigate to Transactions and select one first");
        return Ok(());
    }

    if let Some(txn) = app.selected_transaction() {
        let id = txn.id;
        let desc = txn.description.clone();
        app.confirm_message = format!("Delete '{desc}'?");
        app.pending_action = Some(PendingAction::DeleteTransaction {
            id,
            description: desc,
        });
        app.input_mode = InputMode::Confirm;
    }

    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    const USAGE: &str = "Usage: :budget <category> <limit> [threshold]. Example: :budget groceries 500 0.8";
    if args.is_empty() {
        app.set_status(USAGE);
        return Ok(());
    }

    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() < 2 {
        app.set_status(USAGE);
        return Ok(());
    }

    let category = Category::parse(parts[0]);
    let limit = match Decimal::from_str(parts[1]) {
        Ok(a) if a > Decimal::ZERO => a,
        _ => {
            app.set_status(format!("Invalid limit: {}", parts[1]));
            return Ok(());
        }
    };
    let threshold = match parts.get(2) {
        Some(t) => match Decimal::from_str(t) {
            Ok(v) if v > Decimal::ZERO && v <= Decimal::ONE => v,
            _ => {
                app.set_status(format!("Invalid threshold: {t}. Use a 0-1 fraction"));
                return Ok(());
            }
        },
        None => Decimal::new(8, 1), // 0.8
    };

    session
        .store
        .upsert_budget(Budget::new(category, limit, threshold));
    app.refresh_budgets(&session.store);
    app.screen = Screen::Budgets;
    app.set_status(format!("Budget set: {category} = ${limit}"));
    Ok(())
}

fn cmd_delete_budget(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    if app.budgets.is_empty() {
        app.set_status("No budgets to delete");
        return Ok(());
    }

    if let Some(line) = app.budgets.get(app.budget_index) {
        app.confirm_message = format!("Delete budget for '{}'?", line.category);
        app.pending_action = Some(PendingAction::DeleteBudget {
            category: line.category,
        });
        app.input_mode = InputMode::Confirm;
    }

    Ok(())
}

fn cmd_template(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    const USAGE: &str = "Usage: :template <next-due> <recurrence> <name> <amount> [category]. \
         Example: :template 2024-02-01 monthly Rent -1200 housing";
    if args.is_empty() {
        app.set_status(USAGE);
        return Ok(());
    }

    let parts: Vec<&str> = args.splitn(3, ' ').collect();
    if parts.len() < 3 {
        app.set_status(USAGE);
        return Ok(());
    }

    let next_due = parts[0];
    let due_date = match chrono::NaiveDate::parse_from_str(next_due, "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => {
            app.set_status(format!("Invalid date: {next_due}. Use YYYY-MM-DD"));
            return Ok(());
        }
    };

    let Some(recurrence) = Recurrence::parse(parts[1]) else {
        app.set_status(format!(
            "Invalid recurrence: {}. Use daily, weekly, monthly or yearly",
            parts[1]
        ));
        return Ok(());
    };

    let tail: Vec<&str> = parts[2].rsplitn(3, ' ').collect();
    let (name, amount_str, category) = match tail.as_slice() {
        [last, mid, head] if Decimal::from_str(mid).is_ok() => {
            (head.to_string(), *mid, Category::parse(last))
        }
        [last, mid, head] => (format!("{head} {mid}"), *last, Category::Other),
        [last, head] => (head.to_string(), *last, Category::Other),
        _ => {
            app.set_status(USAGE);
            return Ok(());
        }
    };

    let signed = match Decimal::from_str(amount_str) {
        Ok(a) => a,
        Err(_) => {
            app.set_status(format!("Invalid amount: {amount_str}"));
            return Ok(());
        }
    };
    let kind = if signed < Decimal::ZERO {
        TxnKind::Expense
    } else {
        TxnKind::Income
    };

    let template = RecurringTemplate {
        id: 0,
        name: name.clone(),
        amount: signed.abs(),
        category,
        kind,
        recurrence,
        recurrence_day: match recurrence {
            Recurrence::Monthly | Recurrence::Yearly => Some(due_date.day()),
            _ => None,
        },
        next_due: next_due.to_string(),
        is_active: true,
        auto_execute: true,
        notify: true,
    };
    session.store.upsert_template(template);
    app.refresh_templates(&session.store);
    app.screen = Screen::Recurring;
    app.set_status(format!("Template added: {name} ({recurrence}, next {next_due})"));
    Ok(())
}

fn cmd_delete_template(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    if app.templates.is_empty() {
        app.set_status("No templates to delete");
        return Ok(());
    }

    if let Some(template) = app.templates.get(app.template_index) {
        app.confirm_message = format!("Delete template '{}'?", template.name);
        app.pending_action = Some(PendingAction::DeleteTemplate {
            id: template.id,
            name: template.name.clone(),
        });
        app.input_mode = InputMode::Confirm;
    }

    Ok(())
}

fn cmd_toggle_template(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if let Some(template) = app.templates.get(app.template_index) {
        let mut edited = template.clone();
        edited.is_active = !edited.is_active;
        let name = edited.name.clone();
        let state = if edited.is_active { "active" } else { "paused" };
        session.store.upsert_template(edited);
        app.refresh_templates(&session.store);
        app.set_status(format!("Template '{name}' is now {state}"));
    } else {
        app.set_status("No template selected");
    }
    Ok(())
}

fn cmd_run_due(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();
    let due = session
        .store
        .templates()
        .iter()
        .filter(|t| t.is_active && t.is_due(today))
        .count();
    if due == 0 {
        app.set_status("No templates due");
        return Ok(());
    }

    app.confirm_message = format!("Run {due} due template(s) now?");
    app.pending_action = Some(PendingAction::RunDueTemplates);
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_read(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if let Some(n) = app.notifications.get(app.notification_index) {
        if let Err(e) = session.store.mark_notification_read(n.id) {
            app.set_status(format!("{e}"));
        } else {
            app.refresh_notifications(&session.store);
            app.set_status("Marked read");
        }
    } else {
        app.set_status("No notification selected");
    }
    Ok(())
}

fn cmd_read_all(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    session.store.mark_all_notifications_read();
    app.refresh_notifications(&session.store);
    app.set_status("All notifications marked read");
    Ok(())
}

fn cmd_delete_notification(
    _args: &str,
    app: &mut App,
    session: &mut Session,
) -> anyhow::Result<()> {
    if let Some(n) = app.notifications.get(app.notification_index) {
        if let Err(e) = session.store.remove_notification(n.id) {
            app.set_status(format!("{e}"));
        } else {
            app.refresh_notifications(&session.store);
            app.set_status("Notification deleted");
        }
    } else {
        app.set_status("No notification selected");
    }
    Ok(())
}

fn cmd_toggle_dark(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let dark = session.store.toggle_dark_mode();
    app.refresh_all(&session.store);
    app.set_status(if dark { "Dark mode on" } else { "Dark mode off" });
    Ok(())
}

fn cmd_toggle_amounts(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let hidden = session.store.toggle_amount_hidden();
    app.amount_hidden = hidden;
    app.set_status(if hidden {
        "Amounts hidden"
    } else {
        "Amounts visible"
    });
    Ok(())
}

fn cmd_toggle_notifications(
    _args: &str,
    app: &mut App,
    session: &mut Session,
) -> anyhow::Result<()> {
    let enabled = session.store.toggle_notifications();
    app.set_status(if enabled {
        "Budget alerts enabled"
    } else {
        "Budget alerts disabled"
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rust_decimal_macros::dec;

    use super::*;
    use crate::persist::MemoryStorage;
    use crate::store::LedgerStore;

    #[test]
    fn test_registry_has_core_commands() {
        for name in [
            "q", "quit", "add-txn", "budget", "delete-budget", "template", "run-due", "read",
            "toggle-dark", "toggle-amounts", "toggle-notifications",
        ] {
            assert!(COMMANDS.contains_key(name), "missing command: {name}");
        }
    }

    #[test]
    fn test_find_closest_suggests_real_command() {
        assert_eq!(find_closest("qiut"), "quit");
    }

    #[test]
    fn test_find_closest_ties_resolve_to_first_name() {
        // "budgett" is equally close to "budget" and "budgets"
        assert_eq!(find_closest("budgett"), "budget");
    }

    #[test]
    fn test_delete_txn_requests_confirmation() {
        let mut store = LedgerStore::open(Box::new(MemoryStorage::new()));
        store.add_transaction(Transaction {
            id: 0,
            amount: dec!(4.50),
            description: "Coffee".into(),
            category: Category::DiningOut,
            kind: TxnKind::Expense,
            date: chrono::Local::now().format("%Y-%m-15").to_string(),
            merchant: None,
            sync: SyncState::Local,
        });
        let mut session = Session::new(store, None);
        let mut app = App::new(&session.store, false);
        app.screen = Screen::Transactions;
        assert_eq!(app.transactions.len(), 1);

        cmd_delete_txn("", &mut app, &mut session).unwrap();

        assert!(matches!(
            app.pending_action,
            Some(PendingAction::DeleteTransaction { .. })
        ));
        assert_eq!(app.input_mode, InputMode::Confirm);
        assert!(app.confirm_message.contains("Coffee"));
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }
}
