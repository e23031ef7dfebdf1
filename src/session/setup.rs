//! Session setup and initialization

use crate::analysis::{AnalysisRunner, AnalysisUpdate, MockAnalyzer};
use crate::config::Config;
use crate::consts::cli_consts::{ANALYSIS_QUEUE_SIZE, EVENT_QUEUE_SIZE};
use crate::events::Event;
use crate::workers::core::EventSender;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Event receiver for background task events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Finished analysis requests
    pub analysis_receiver: mpsc::Receiver<AnalysisUpdate>,
    /// Starts and supersedes analysis requests
    pub runner: AnalysisRunner,
    /// Shutdown sender to stop background tasks
    pub shutdown_sender: broadcast::Sender<()>,
    pub config: Config,
}

/// Sets up channels and the analysis service shared by both modes.
pub fn setup_session(config: Config) -> SessionData {
    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let (analysis_sender, analysis_receiver) = mpsc::channel(ANALYSIS_QUEUE_SIZE);
    let (shutdown_sender, _) = broadcast::channel(1);

    let analyzer = MockAnalyzer::new(Duration::from_millis(config.analysis_delay_ms));
    let runner = AnalysisRunner::new(
        Arc::new(analyzer),
        analysis_sender,
        EventSender::new(event_sender),
    );

    SessionData {
        event_receiver,
        analysis_receiver,
        runner,
        shutdown_sender,
        config,
    }
}
