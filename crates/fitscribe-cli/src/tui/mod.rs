//! Interactive TUI for generating, browsing and editing a workout plan.

pub mod app;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use fitscribe_core::View;
use fitscribe_core::plan::MoveDirection;

use app::App;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Launch the interactive TUI.
pub async fn run_viewer(mut app: App) -> Result<()> {
    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    app.should_quit = true;
                } else if app.show_help {
                    app.show_help = false;
                } else {
                    match app.view() {
                        View::Prompt => handle_prompt_key(terminal, app, key).await?,
                        View::Plan => handle_plan_key(app, key),
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

async fn handle_prompt_key(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    key: KeyEvent,
) -> Result<()> {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter => {
            app.status_message = Some("Generating workout plan...".to_owned());
            terminal.draw(|f| ui::render(f, app))?;
            app.submit().await;
        }
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if app.session.failed_prompt().is_some() {
                app.status_message = Some("Retrying...".to_owned());
                terminal.draw(|f| ui::render(f, app))?;
                app.retry().await;
            }
        }
        KeyCode::Tab => app.cycle_example(),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Char(c) => app.push_char(c),
        _ => {}
    }
    Ok(())
}

fn handle_plan_key(app: &mut App, key: KeyEvent) {
    // Any key other than a repeated quit cancels a pending quit.
    let quitting = matches!(key.code, KeyCode::Char('q') | KeyCode::Esc);
    if !quitting {
        app.confirm_quit = false;
    }
    app.status_message = None;

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('l') | KeyCode::Right => app.next_day(),
        KeyCode::Char('h') | KeyCode::Left => app.prev_day(),
        KeyCode::Tab | KeyCode::Char(']') => app.next_week(),
        KeyCode::BackTab | KeyCode::Char('[') => app.prev_week(),
        KeyCode::Char('K') => app.move_selected(MoveDirection::Up),
        KeyCode::Char('J') => app.move_selected(MoveDirection::Down),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('s') => {
            if let Err(e) = app.save() {
                app.status_message = Some(format!("Save failed: {e:#}"));
            }
        }
        KeyCode::Char('n') => app.new_plan(),
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
}
