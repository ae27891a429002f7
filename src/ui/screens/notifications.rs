use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::NotificationKind;
use crate::ui::app::App;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme;
    if app.notifications.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No notifications", theme.dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Budget alerts appear here when spending crosses a threshold",
                theme.dim_style(),
            )),
        ])
        .centered()
        .block(titled_block(app, " Notifications "));
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .notifications
        .iter()
        .enumerate()
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, n)| {
            let icon_style = match n.kind {
                NotificationKind::Success => theme.ok_style(),
                NotificationKind::Warning => theme.warning_style(),
                NotificationKind::Error => theme.danger_style(),
                NotificationKind::Info => theme.dim_style(),
            };

            let row_style = if i == app.notification_index {
                theme.selected_style()
            } else if !n.is_read {
                theme.unread_style()
            } else {
                theme.dim_style()
            };

            // Timestamp is RFC 3339; the date part is enough here
            let when = n.timestamp.get(..10).unwrap_or(&n.timestamp);
            let read_marker = if n.is_read { "  " } else { "● " };

            ListItem::new(Line::from(vec![
                Span::styled(read_marker, row_style),
                Span::styled(format!("{} ", n.kind.icon()), icon_style),
                Span::styled(format!("{when}  "), theme.dim_style()),
                Span::styled(truncate(&n.message, 90), row_style),
            ]))
        })
        .collect();

    let title = format!(
        " Notifications ({}, {} unread) ",
        app.notifications.len(),
        app.unread_count
    );
    let list = List::new(items).block(titled_block(app, &title));
    f.render_widget(list, area);
}

fn titled_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    let theme = app.theme;
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay()))
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(theme.text_dim())
                .add_modifier(Modifier::BOLD),
        ))
}
