use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::{Backend, CrosstermBackend}, Terminal};
use tracing::{error, info};

use crate::workflow::Progress;
use super::app::App;
use super::rendering::{render_busy, ui};

pub fn run_tui(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("Session ended with error: {:?}", err);
    }
    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.clear_status_message_if_expired();

        terminal.draw(|f| ui(f, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if app.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('q')) {
                app.toggle_help();
            }
            continue;
        }

        if app.show_confirm {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    app.run_apply(true, progress_painter(terminal));
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.run_apply(false, |_| {});
                }
                _ => {}
            }
            continue;
        }

        if app.show_setup {
            match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Enter => {
                    if app.setup_ready() {
                        app.run_preview(progress_painter(terminal));
                    } else {
                        app.handle_setup_navigation(KeyCode::Tab);
                    }
                }
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                    app.handle_setup_navigation(key.code);
                }
                KeyCode::Backspace => app.handle_setup_backspace(),
                KeyCode::Char(c) => app.handle_setup_input(c),
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if app.show_failures {
                    app.toggle_failures();
                } else {
                    info!("Quit requested");
                    return Ok(());
                }
            }
            KeyCode::Char('h') => app.toggle_help(),
            KeyCode::Char('f') => app.toggle_failures(),
            KeyCode::Char('v') => app.toggle_preview(),
            KeyCode::Char('s') => app.back_to_setup(),
            KeyCode::Char('p') => app.run_preview(progress_painter(terminal)),
            KeyCode::Char('r') => app.request_confirmation(),
            KeyCode::Down | KeyCode::Char('j') => app.next(),
            KeyCode::Up | KeyCode::Char('k') => app.previous(),
            _ => {}
        }
    }
}

/// Redraws a progress screen for every step of a running batch.
fn progress_painter<B: Backend>(terminal: &mut Terminal<B>) -> impl FnMut(Progress) + '_ {
    move |progress| {
        if let Err(e) = terminal.draw(|f| render_busy(f, &progress)) {
            error!("Failed to draw progress: {}", e);
        }
    }
}
