//! Event System
//!
//! Activity events emitted by the dashboard and its background tasks.

use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;

/// Where an event originated.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Source {
    /// Widget grid edits and chart interaction.
    Dashboard,
    /// File loading and parsing.
    Upload,
    /// Background analysis requests.
    Analysis,
    /// Product catalog and cart.
    Catalog,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    StateChange,
}

/// Lifecycle of the analysis panel.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum AnalysisState {
    Idle,
    Analyzing,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Set on analysis state change events.
    pub analysis_state: Option<AnalysisState>,
}

impl Event {
    pub fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            analysis_state: None,
        }
    }

    pub fn state_change(state: AnalysisState, msg: String) -> Self {
        Self {
            analysis_state: Some(state),
            ..Self::new(Source::Analysis, msg, EventType::StateChange, LogLevel::Info)
        }
    }

    pub fn dashboard(msg: impl Into<String>, event_type: EventType) -> Self {
        Self::new(Source::Dashboard, msg.into(), event_type, LogLevel::Info)
    }

    pub fn upload_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Upload, msg, event_type, log_level)
    }

    pub fn analysis_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Analysis, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.source, self.msg
        )
    }
}
