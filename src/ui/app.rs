//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::analysis::{AnalysisRunner, AnalysisUpdate};
use crate::config::Config;
use crate::consts::cli_consts::{PAN_STEP, POLL_INTERVAL_MS, SPLASH_DURATION_MS, ZOOM_STEP};
use crate::events::{AnalysisState, Event as DashboardEvent};
use crate::ui::dashboard::{DashboardState, dashboard_areas, render_dashboard};
use crate::ui::splash::render_splash;
use crate::upload::{Dataset, UploadError};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal, backend::Backend};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Widget grid with the insights panel.
    Dashboard(Box<DashboardState>),
}

/// Application state
pub struct App {
    /// The start time of the application.
    start_time: Instant,

    config: Config,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives events from background tasks.
    event_receiver: mpsc::Receiver<DashboardEvent>,

    /// Receives finished analysis requests.
    analysis_receiver: mpsc::Receiver<AnalysisUpdate>,

    runner: AnalysisRunner,

    /// Broadcasts shutdown signal to background tasks.
    shutdown_sender: broadcast::Sender<()>,

    /// File given on the command line, loaded when the dashboard opens.
    initial_data: Option<Result<Dataset, UploadError>>,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        config: Config,
        event_receiver: mpsc::Receiver<DashboardEvent>,
        analysis_receiver: mpsc::Receiver<AnalysisUpdate>,
        runner: AnalysisRunner,
        shutdown_sender: broadcast::Sender<()>,
        initial_data: Option<Result<Dataset, UploadError>>,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            config,
            current_screen: Screen::Splash,
            event_receiver,
            analysis_receiver,
            runner,
            shutdown_sender,
            initial_data,
        }
    }

    /// Leave the splash screen.
    fn enter_dashboard(&mut self) {
        let mut state = DashboardState::new(&self.config, self.start_time);
        if let Some(result) = self.initial_data.take() {
            if state.load_dataset(result) {
                request_analysis(&mut self.runner, &mut state);
            }
        }
        self.current_screen = Screen::Dashboard(Box::new(state));
    }

    /// Handle a key press. Returns true when the application should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl_c =
            key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
        if ctrl_c || key.code == KeyCode::Char('q') {
            return true;
        }

        // Any key press will skip the splash screen
        if let Screen::Splash = self.current_screen {
            self.enter_dashboard();
            return false;
        }
        let Screen::Dashboard(state) = &mut self.current_screen else {
            return false;
        };

        if state.modal_error.is_some() {
            if matches!(key.code, KeyCode::Char('e') | KeyCode::Enter | KeyCode::Esc) {
                state.dismiss_error();
            }
            return false;
        }

        if state.drag.is_dragging() {
            match key.code {
                KeyCode::Left | KeyCode::Up => state.move_drag_target(false),
                KeyCode::Right | KeyCode::Down => state.move_drag_target(true),
                KeyCode::Char(' ') => state.toggle_keyboard_drag(),
                KeyCode::Esc => state.cancel_drag(),
                _ => {}
            }
            return false;
        }

        match key.code {
            KeyCode::Left | KeyCode::Up => state.focus_previous(),
            KeyCode::Right | KeyCode::Down => state.focus_next(),
            KeyCode::Char(' ') => state.toggle_keyboard_drag(),
            KeyCode::Char('a') => state.add_widget(),
            KeyCode::Char('x') => state.remove_focused(),
            KeyCode::Char('s') => state.cycle_size(),
            KeyCode::Char('t') => state.toggle_kind(),
            KeyCode::Char('r') => state.reset_layout(),
            KeyCode::Char('[') => state.chart_previous(),
            KeyCode::Char(']') => state.chart_next(),
            KeyCode::Char('+') | KeyCode::Char('=') => state.chart_zoom(ZOOM_STEP),
            KeyCode::Char('-') => state.chart_zoom(1.0 / ZOOM_STEP),
            KeyCode::Char('h') => state.chart_pan(PAN_STEP),
            KeyCode::Char('l') => state.chart_pan(-PAN_STEP),
            KeyCode::Char('0') => state.chart_reset(),
            KeyCode::Char('i') => request_analysis(&mut self.runner, state),
            KeyCode::Char('e') => state.dismiss_error(),
            _ => {}
        }
        false
    }

    /// Replay queued background events, then apply finished analyses.
    ///
    /// Events go first so a state change never lands on top of the result
    /// it preceded.
    fn drain_background(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            if let Screen::Dashboard(state) = &mut self.current_screen {
                state.add_event(event);
            }
        }
        if let Screen::Dashboard(state) = &mut self.current_screen {
            state.update();
        }
        while let Ok(update) = self.analysis_receiver.try_recv() {
            if let Some(outcome) = self.runner.accept(update) {
                if let Screen::Dashboard(state) = &mut self.current_screen {
                    state.apply_analysis(outcome);
                }
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Screen::Dashboard(state) = &mut self.current_screen else {
            return;
        };
        if state.modal_error.is_some() {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => state.pointer_down(mouse.column, mouse.row),
            MouseEventKind::Drag(MouseButton::Left) => state.pointer_drag(mouse.column, mouse.row),
            MouseEventKind::Up(MouseButton::Left) => state.pointer_up(),
            _ => {}
        }
    }
}

/// Start (or restart) analysis of the loaded dataset.
fn request_analysis(runner: &mut AnalysisRunner, state: &mut DashboardState) {
    let Some(data) = &state.data else {
        return;
    };
    if runner
        .trigger(Arc::clone(&data.records), data.file_name.clone())
        .is_some()
    {
        state.analysis_error = None;
        state.analysis_state = AnalysisState::Analyzing;
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_millis(SPLASH_DURATION_MS);

    // UI event loop
    loop {
        app.drain_background();

        if let Screen::Dashboard(state) = &mut app.current_screen {
            let size = terminal.size()?;
            state.grid_area = dashboard_areas(Rect::new(0, 0, size.width, size.height)).grid;
        }
        terminal.draw(|f| render(f, &app.current_screen))?;

        // Handle splash-to-dashboard transition
        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.enter_dashboard();
                continue;
            }
        }

        if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    // Skip events that are not KeyEventKind::Press
                    if key.kind == event::KeyEventKind::Release {
                        continue;
                    }
                    if app.handle_key(key) {
                        app.runner.cancel();
                        let _ = app.shutdown_sender.send(());
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}
