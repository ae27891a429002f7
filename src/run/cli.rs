use std::str::FromStr;

use anyhow::Result;
use chrono::Datelike;
use rust_decimal::Decimal;

use crate::models::{Category, SyncState, Transaction, TxnKind};
use crate::session::Session;
use crate::store::BudgetStatus;
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], session: &mut Session) -> Result<()> {
    match args[1].as_str() {
        "add" => cli_add(&args[2..], session),
        "summary" | "s" => cli_summary(&args[2..], session),
        "budgets" => cli_budgets(session),
        "recurring" => cli_recurring(&args[2..], session),
        "notifications" => cli_notifications(&args[2..], session),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("homeledger {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("HomeLedger — household income, spending and budget tracker");
    println!();
    println!("Usage: homeledger [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  add <date> <desc> <amount> [category]");
    println!("                                Add a transaction (negative amount = expense)");
    println!("  summary [YYYY-MM]             Print monthly financial summary");
    println!("  budgets                       List budgets with spent amounts and status");
    println!("  recurring [run]               List templates, or materialize all due ones");
    println!("  notifications [read-all]      List this run's alerts, or mark them all read");
    println!("                                (alerts are not kept between runs)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_add(args: &[String], session: &mut Session) -> Result<()> {
    if args.len() < 3 {
        anyhow::bail!("Usage: homeledger add <date> <description> <amount> [category]");
    }

    let date = &args[0];
    if chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        anyhow::bail!("Invalid date: {date}. Use YYYY-MM-DD");
    }

    // Last arg may be a category key; the amount sits just before the
    // description otherwise
    let (amount_idx, category) = match Decimal::from_str(&args[args.len() - 1]) {
        Ok(_) => (args.len() - 1, Category::Other),
        Err(_) => (args.len() - 2, Category::parse(&args[args.len() - 1])),
    };
    if amount_idx < 2 {
        anyhow::bail!("Usage: homeledger add <date> <description> <amount> [category]");
    }

    let signed = Decimal::from_str(&args[amount_idx])
        .map_err(|_| anyhow::anyhow!("Invalid amount: {}", args[amount_idx]))?;
    let kind = if signed < Decimal::ZERO {
        TxnKind::Expense
    } else {
        TxnKind::Income
    };
    let description = args[1..amount_idx].join(" ");

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
    let id = session.add_transaction(txn);
    let record = session.store.find_transaction(id);
    let synced = matches!(record.map(|t| t.sync), Some(SyncState::Synced));

    println!(
        "Added {kind}: {description} {} ({category}){}",
        format_amount(signed.abs()),
        if session.has_remote() && !synced {
            " [not synced]"
        } else {
            ""
        }
    );

    for n in session.store.notifications() {
        println!("Alert: {}", n.message);
    }

    Ok(())
}

fn cli_summary(args: &[String], session: &mut Session) -> Result<()> {
    let month = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .cloned()
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m").to_string());

    let date = chrono::NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid month: {month}. Use YYYY-MM"))?;

    let store = &session.store;
    let (income, expenses) = store.monthly_totals(date.year(), date.month());
    let net = income - expenses;
    let spending = store.spending_by_category(date.year(), date.month());

    println!("HomeLedger — {month}");
    println!("{}", "─".repeat(40));
    println!("  Income:     {}", format_amount(income));
    println!("  Expenses:   {}", format_amount(expenses));
    println!("  Net:        {}", format_amount(net));
    println!("  Total Txns: {}", store.transactions().len());

    if !spending.is_empty() {
        println!();
        println!("Spending by Category:");
        for (category, amount) in &spending {
            println!("  {:<24} {}", category.to_string(), format_amount(*amount));
        }
    }

    Ok(())
}

fn cli_budgets(session: &mut Session) -> Result<()> {
    let overview = session.store.budget_overview();
    if overview.is_empty() {
        println!("No budgets set");
        return Ok(());
    }

    println!("{:<16} {:>12} {:>12} {:>6}  Status", "Category", "Spent", "Limit", "Used");
    println!("{}", "─".repeat(58));
    for line in &overview {
        let pct = if line.limit > Decimal::ZERO {
            line.spent * Decimal::ONE_HUNDRED / line.limit
        } else {
            Decimal::ZERO
        };
        let marker = match line.status {
            BudgetStatus::Ok => "",
            BudgetStatus::Warning => " ⚠",
            BudgetStatus::Danger => " !!",
        };
        println!(
            "{:<16} {:>12} {:>12} {:>5.0}%  {}{marker}",
            line.category.to_string(),
            format_amount(line.spent),
            format_amount(line.limit),
            pct,
            line.status,
        );
    }
    Ok(())
}

fn cli_recurring(args: &[String], session: &mut Session) -> Result<()> {
    let today = chrono::Local::now().date_naive();

    if args.first().map(String::as_str) == Some("run") {
        let created = session.store.run_due_templates(today);
        if created.is_empty() {
            println!("No templates due");
        } else {
            println!("Created {} transaction(s):", created.len());
            for id in created {
                if let Some(txn) = session.store.find_transaction(id) {
                    println!(
                        "  {} {} {} ({})",
                        txn.date,
                        txn.description,
                        format_amount(txn.amount),
                        txn.category
                    );
                }
            }
        }
        return Ok(());
    }

    let templates = session.store.templates();
    if templates.is_empty() {
        println!("No recurring templates");
        return Ok(());
    }

    println!(
        "{:<24} {:>12} {:<10} {:<12} State",
        "Name", "Amount", "Repeats", "Next due"
    );
    println!("{}", "─".repeat(68));
    for t in templates {
        let state = if !t.is_active {
            "paused"
        } else if t.is_due(today) {
            "due"
        } else {
            "active"
        };
        println!(
            "{:<24} {:>12} {:<10} {:<12} {state}",
            t.name,
            format_amount(t.amount),
            t.recurrence.to_string(),
            t.next_due,
        );
    }
    Ok(())
}

fn cli_notifications(args: &[String], session: &mut Session) -> Result<()> {
    if args.first().map(String::as_str) == Some("read-all") {
        session.store.mark_all_notifications_read();
        println!("All notifications marked read");
        return Ok(());
    }

    let notifications = session.store.notifications();
    if notifications.is_empty() {
        println!("No notifications this run (alerts are not kept between runs)");
        return Ok(());
    }

    for n in notifications.iter().rev() {
        let when = n.timestamp.get(..10).unwrap_or(&n.timestamp);
        let unread = if n.is_read { " " } else { "*" };
        println!("{unread} {} {when}  {}", n.kind.icon(), n.message);
    }
    Ok(())
}
