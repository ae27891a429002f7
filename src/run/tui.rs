use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::session::Session;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(session: &mut Session) -> Result<()> {
    let mut app = App::new(&session.store, session.has_remote());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, session);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    session: &mut Session,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, session)?,
                InputMode::Command => handle_command_input(key, app, session)?,
                InputMode::Search => handle_search_input(key, app, session)?,
                InputMode::Editing => handle_editing_input(key, app, session)?,
                InputMode::Confirm => handle_confirm_input(key, app, session)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.search_input.clear();
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, session, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, session, Screen::Transactions),
        KeyCode::Char('3') => switch_screen(app, session, Screen::Budgets),
        KeyCode::Char('4') => switch_screen(app, session, Screen::Recurring),
        KeyCode::Char('5') => switch_screen(app, session, Screen::Notifications),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, session, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, session, screens[prev]);
        }
        KeyCode::Enter => handle_enter(app, session)?,
        KeyCode::Esc => handle_escape(app, session),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('H') => {
            commands::handle_command("prev-month", app, session)?;
        }
        KeyCode::Char('L') => {
            commands::handle_command("next-month", app, session)?;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        KeyCode::Char('D') => match app.screen {
            Screen::Transactions => commands::handle_command("delete-txn", app, session)?,
            Screen::Budgets => commands::handle_command("delete-budget", app, session)?,
            Screen::Recurring => commands::handle_command("delete-template", app, session)?,
            Screen::Notifications => {
                commands::handle_command("delete-notification", app, session)?;
            }
            Screen::Dashboard => {}
        },
        KeyCode::Char('R') if app.screen == Screen::Recurring => {
            commands::handle_command("run-due", app, session)?;
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, session)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_search_input(key: event::KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            app.screen = Screen::Transactions;
            app.refresh_transactions(&session.store);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.search_input.clear();
            app.refresh_transactions(&session.store);
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            // Live search: filter as you type
            app.screen = Screen::Transactions;
            app.transaction_index = 0;
            app.transaction_scroll = 0;
            app.refresh_transactions(&session.store);
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            // Live search: filter as you type
            app.screen = Screen::Transactions;
            app.transaction_index = 0;
            app.transaction_scroll = 0;
            app.refresh_transactions(&session.store);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let new_name = app.command_input.clone();
            if !new_name.is_empty() {
                if let Some(txn) = app.selected_transaction() {
                    let mut edited = txn.clone();
                    edited.description = new_name.clone();
                    match session.update_transaction(edited) {
                        Ok(()) => {
                            app.refresh_transactions(&session.store);
                            app.set_status(format!("Renamed to: {new_name}"));
                        }
                        Err(e) => app.set_status(format!("{e}")),
                    }
                }
            }
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeleteTransaction { id, description } => {
                        match session.delete_transaction(id) {
                            Ok(_) => {
                                app.refresh_all(&session.store);
                                if app.transaction_index > 0
                                    && app.transaction_index >= app.transactions.len()
                                {
                                    app.transaction_index =
                                        app.transactions.len().saturating_sub(1);
                                }
                                app.set_status(format!("Deleted: {description}"));
                            }
                            Err(e) => app.set_status(format!("{e}")),
                        }
                    }
                    PendingAction::DeleteBudget { category } => {
                        match session.store.remove_budget(category) {
                            Ok(()) => {
                                app.refresh_budgets(&session.store);
                                if app.budget_index > 0 {
                                    app.budget_index -= 1;
                                }
                                app.set_status(format!("Deleted budget: {category}"));
                            }
                            Err(e) => app.set_status(format!("{e}")),
                        }
                    }
                    PendingAction::DeleteTemplate { id, name } => {
                        match session.store.remove_template(id) {
                            Ok(()) => {
                                app.refresh_templates(&session.store);
                                if app.template_index > 0 {
                                    app.template_index -= 1;
                                }
                                app.set_status(format!("Deleted template: {name}"));
                            }
                            Err(e) => app.set_status(format!("{e}")),
                        }
                    }
                    PendingAction::RunDueTemplates => {
                        let today = chrono::Local::now().date_naive();
                        let created = session.store.run_due_templates(today);
                        app.refresh_all(&session.store);
                        app.set_status(format!("Created {} transaction(s)", created.len()));
                    }
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        _ => {
            // Any other key = cancel
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, session: &Session, screen: Screen) {
    app.screen = screen;
    match screen {
        Screen::Dashboard => app.refresh_dashboard(&session.store),
        Screen::Transactions => app.refresh_transactions(&session.store),
        Screen::Budgets => app.refresh_budgets(&session.store),
        Screen::Recurring => app.refresh_templates(&session.store),
        Screen::Notifications => app.refresh_notifications(&session.store),
    }
}

fn handle_move_down(app: &mut App) {
    let page = app.visible_rows.max(1);
    match app.screen {
        Screen::Transactions => scroll_down(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.transactions.len(),
            page,
        ),
        Screen::Budgets => {
            if app.budget_index + 1 < app.budgets.len() {
                app.budget_index += 1;
            }
        }
        Screen::Recurring => {
            if app.template_index + 1 < app.templates.len() {
                app.template_index += 1;
            }
        }
        Screen::Notifications => {
            if app.notification_index + 1 < app.notifications.len() {
                app.notification_index += 1;
            }
        }
        Screen::Dashboard => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        Screen::Budgets => app.budget_index = app.budget_index.saturating_sub(1),
        Screen::Recurring => app.template_index = app.template_index.saturating_sub(1),
        Screen::Notifications => {
            app.notification_index = app.notification_index.saturating_sub(1);
        }
        Screen::Dashboard => {}
    }
}

fn handle_enter(app: &mut App, session: &mut Session) -> Result<()> {
    match app.screen {
        // Enter on a notification marks it read
        Screen::Notifications => commands::handle_command("read", app, session),
        // Enter on a template toggles it
        Screen::Recurring => commands::handle_command("toggle-template", app, session),
        _ => Ok(()),
    }
}

fn handle_escape(app: &mut App, session: &Session) {
    app.status_message.clear();
    if !app.search_input.is_empty() {
        app.search_input.clear();
        app.refresh_transactions(&session.store);
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        Screen::Budgets => app.budget_index = 0,
        Screen::Recurring => app.template_index = 0,
        Screen::Notifications => app.notification_index = 0,
        Screen::Dashboard => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    let page = app.visible_rows.max(1);
    match app.screen {
        Screen::Transactions => scroll_to_bottom(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.transactions.len(),
            page,
        ),
        Screen::Budgets => {
            if !app.budgets.is_empty() {
                app.budget_index = app.budgets.len() - 1;
            }
        }
        Screen::Recurring => {
            if !app.templates.is_empty() {
                app.template_index = app.templates.len() - 1;
            }
        }
        Screen::Notifications => {
            if !app.notifications.is_empty() {
                app.notification_index = app.notifications.len() - 1;
            }
        }
        Screen::Dashboard => {}
    }
}
