//! TUI mode execution

use super::{SessionData, messages::print_session_exit_success};
use crate::ui;
use crate::upload::load_file;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::path::Path;
use std::{error::Error, io};

/// Runs the interactive dashboard
///
/// This function handles:
/// 1. Loading the optional data file
/// 2. Terminal setup and cleanup
/// 3. UI application initialization and execution
///
/// The terminal is restored before any error from the UI loop is reported.
pub async fn run_tui_mode(session: SessionData, data: Option<&Path>) -> Result<(), Box<dyn Error>> {
    // Parse failures surface as the dashboard's alert, not here.
    let initial_data = data.map(load_file);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Initialize the terminal with Crossterm backend
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = ui::App::new(
        session.config,
        session.event_receiver,
        session.analysis_receiver,
        session.runner,
        session.shutdown_sender,
        initial_data,
    );

    let result = ui::run(&mut terminal, app).await;

    // Clean up the terminal after running the application
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle the result
    result?;

    print_session_exit_success();
    Ok(())
}
