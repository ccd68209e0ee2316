//! Hublink CLI - connect a HubSpot CRM integration from the terminal.

use std::io;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use hublink_cli::app::App;
use hublink_cli::config::Config;
use hublink_cli::input;

fn main() -> Result<()> {
    // Load configuration
    let config = Config::load();

    // The flow controller spawns tasks; keep a runtime entered for the
    // lifetime of the sync event loop.
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(&config);

    // Run app
    let res = input::run_app(&mut terminal, &mut app, &config);

    // Cancel any in-flight authorization work before leaving
    app.teardown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
