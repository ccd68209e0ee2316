use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};

use crate::app::App;
use crate::config::Config;
use crate::integration::FlowState;
use crate::ui;

/// Result of handling a key event.
pub enum HandleResult {
    /// Continue running the app
    Continue,
    /// Exit the app
    Exit,
}

/// Run the main application loop.
pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config: &Config,
) -> io::Result<()> {
    loop {
        // Drain flow events before drawing so state changes show this frame
        app.process_flow();
        app.tick_toasts();

        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = Duration::from_millis(config.behavior.idle_poll_ms);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match handle_key_event(app, key.code, key.modifiers, config) {
                        HandleResult::Exit => return Ok(()),
                        HandleResult::Continue => {}
                    }
                }
            }
        }
        // On timeout the loop redraws, picking up flow events and toasts
    }
}

/// Handle a key event and return whether to continue or exit.
fn handle_key_event(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    config: &Config,
) -> HandleResult {
    let page_size = config.behavior.scroll_page_size;
    let max_offset = app.items().len().saturating_sub(1);

    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            return HandleResult::Exit;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            return HandleResult::Exit;
        }
        KeyCode::Enter => {
            // The connect control is disabled while connecting and
            // non-interactive once connected; App::connect enforces both.
            app.connect();
        }
        KeyCode::Char('d') => {
            if app.state() == FlowState::Connecting {
                app.finish_authorization();
            }
        }
        KeyCode::Up => app.scroll.scroll_up(),
        KeyCode::Down => app.scroll.scroll_down(max_offset),
        KeyCode::PageUp => app.scroll.page_up(page_size),
        KeyCode::PageDown => app.scroll.page_down(max_offset, page_size),
        KeyCode::Home => app.scroll.offset = 0,
        KeyCode::End => app.scroll.offset = max_offset,
        _ => {}
    }

    HandleResult::Continue
}
