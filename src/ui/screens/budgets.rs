use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::store::BudgetStatus;
use crate::ui::app::App;
use crate::ui::util::{display_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme;
    if app.budgets.is_empty() {
        render_empty(f, area, app);
        return;
    }

    let items: Vec<ListItem> = app
        .budgets
        .iter()
        .enumerate()
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, line)| {
            let ratio = if line.limit > Decimal::ZERO {
                (line.spent / line.limit).to_f64().unwrap_or(0.0).min(1.0)
            } else {
                0.0
            };

            let color = match line.status {
                BudgetStatus::Danger => theme.red(),
                BudgetStatus::Warning => theme.yellow(),
                BudgetStatus::Ok => theme.green(),
            };

            let style = if i == app.budget_index {
                theme.selected_style()
            } else if i % 2 == 0 {
                theme.alt_row_style()
            } else {
                theme.normal_style()
            };

            let bar = create_progress_bar(ratio, 20);
            let display_name = truncate(&line.category.to_string(), 17);

            ListItem::new(Line::from(vec![
                Span::styled(format!("{display_name:<18}"), style),
                Span::styled(
                    format!(
                        "{}/{} ",
                        display_amount(line.spent, app.amount_hidden),
                        display_amount(line.limit, app.amount_hidden)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(bar, Style::default().fg(color)),
                Span::styled(
                    format!(" {:.0}% [{}]", ratio * 100.0, line.status),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.overlay()))
            .title(Span::styled(
                " Budgets ",
                Style::default()
                    .fg(theme.text_dim())
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

fn render_empty(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme;
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No budgets set", theme.dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Use :budget <category> <limit> to set a spending limit",
            theme.dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.overlay()))
            .title(Span::styled(
                " Budgets ",
                Style::default()
                    .fg(theme.text_dim())
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(msg, area);
}

fn create_progress_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
