//! Core worker utilities

use crate::events::{AnalysisState, Event, EventType};
use crate::logging::LogLevel;
use tokio::sync::mpsc;

/// Common event sending utilities for background tasks
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    pub async fn send_analysis_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        let _ = self
            .sender
            .send(Event::analysis_with_level(message, event_type, log_level))
            .await;
    }

    /// Queue a state change without waiting. Dropped when the queue is full.
    pub fn queue_state_change(&self, state: AnalysisState, message: String) {
        if let Err(e) = self.sender.try_send(Event::state_change(state, message)) {
            log::debug!("State change not queued: {}", e);
        }
    }
}
