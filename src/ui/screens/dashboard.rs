use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::store::BudgetStatus;
use crate::ui::app::App;
use crate::ui::util::{display_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(10),   // Spending chart
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_spending_chart(f, chunks[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme;
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let net = app.monthly_income - app.monthly_expenses;
    let income_count = app.transactions.iter().filter(|t| t.is_income()).count();
    let expense_count = app.transactions.iter().filter(|t| t.is_expense()).count();

    render_card(
        f,
        cards[0],
        app,
        "Income",
        display_amount(app.monthly_income, app.amount_hidden),
        theme.green(),
        Some(format!("{income_count} txns")),
    );
    render_card(
        f,
        cards[1],
        app,
        "Expenses",
        display_amount(app.monthly_expenses, app.amount_hidden),
        theme.red(),
        Some(format!("{expense_count} txns")),
    );
    render_card(
        f,
        cards[2],
        app,
        "Net",
        display_amount(net, app.amount_hidden),
        if net >= Decimal::ZERO {
            theme.green()
        } else {
            theme.red()
        },
        None,
    );

    // Budget health card: worst status across all budgets
    let over = app
        .budgets
        .iter()
        .filter(|b| b.status == BudgetStatus::Danger)
        .count();
    let warning = app
        .budgets
        .iter()
        .filter(|b| b.status == BudgetStatus::Warning)
        .count();
    let (label, color) = if over > 0 {
        (format!("{over} over limit"), theme.red())
    } else if warning > 0 {
        (format!("{warning} near limit"), theme.yellow())
    } else if app.budgets.is_empty() {
        ("none set".to_string(), theme.text_dim())
    } else {
        ("all on track".to_string(), theme.green())
    };
    render_card(
        f,
        cards[3],
        app,
        "Budgets",
        label,
        color,
        Some(format!("{} tracked", app.budgets.len())),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    app: &App,
    title: &str,
    value: String,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let theme = app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay()))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme.text_dim())
                .add_modifier(Modifier::BOLD),
        ));

    let sub_text = subtitle.unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sub_text, theme.dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_spending_chart(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme;
    if app.spending_by_category.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.overlay()))
            .title(Span::styled(
                " Spending by Category ",
                Style::default()
                    .fg(theme.text_dim())
                    .add_modifier(Modifier::BOLD),
            ));
        let msg = Paragraph::new(Line::from(Span::styled(
            "No spending this month. Add a transaction with :add-txn",
            theme.dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .spending_by_category
        .iter()
        .take(12)
        .map(|(category, amt)| {
            let val = amt.to_u64().unwrap_or(0);
            let label = truncate(&category.to_string(), 10);
            Bar::default()
                .value(val)
                .label(Line::from(label))
                .style(Style::default().fg(theme.accent()))
                .value_style(
                    Style::default()
                        .fg(theme.text())
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.overlay()))
                .title(Span::styled(
                    " Spending by Category ",
                    Style::default()
                        .fg(theme.text_dim())
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme.accent()))
        .value_style(Style::default().fg(theme.text()));

    f.render_widget(chart, area);
}
