use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::TxnKind;
use crate::ui::app::App;
use crate::ui::util::{display_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme;
    if app.templates.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No recurring templates", theme.dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :template <next-due> <recurrence> <name> <amount>",
                theme.dim_style(),
            )),
        ])
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.overlay()))
                .title(Span::styled(
                    " Recurring ",
                    Style::default()
                        .fg(theme.text_dim())
                        .add_modifier(Modifier::BOLD),
                )),
        );
        f.render_widget(msg, area);
        return;
    }

    let today = chrono::Local::now().date_naive();

    let header_cells = ["Name", "Amount", "Category", "Repeats", "Next due", "State"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .templates
        .iter()
        .enumerate()
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, t)| {
            let style = if i == app.template_index {
                theme.selected_style()
            } else if i % 2 == 1 {
                theme.alt_row_style()
            } else {
                theme.normal_style()
            };

            let sign = if t.kind == TxnKind::Income { "+" } else { "-" };
            let amount_str = format!("{sign}{}", display_amount(t.amount, app.amount_hidden));
            let amount_style = if t.kind == TxnKind::Income {
                theme.income_style()
            } else {
                theme.expense_style()
            };

            let (state, state_style) = if !t.is_active {
                ("paused", theme.dim_style())
            } else if t.is_due(today) {
                ("due", theme.warning_style())
            } else {
                ("active", theme.ok_style())
            };

            Row::new(vec![
                Cell::from(truncate(&t.name, 24)),
                Cell::from(Span::styled(amount_str, amount_style)),
                Cell::from(t.category.to_string()),
                Cell::from(t.recurrence.to_string()),
                Cell::from(t.next_due.clone()),
                Cell::from(Span::styled(state, state_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(12),
        Constraint::Length(15),
        Constraint::Length(9),
        Constraint::Length(12),
        Constraint::Length(8),
    ];

    let due_count = app
        .templates
        .iter()
        .filter(|t| t.is_active && t.is_due(today))
        .count();
    let title = if due_count > 0 {
        format!(" Recurring ({} templates, {due_count} due) ", app.templates.len())
    } else {
        format!(" Recurring ({} templates) ", app.templates.len())
    };

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.overlay()))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(theme.text_dim())
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
