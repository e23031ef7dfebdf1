//! Dashboard header component
//!
//! Renders the title and analysis progress gauge

use super::super::state::DashboardState;
use crate::events::AnalysisState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and analysis progress.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title_text = match &state.data {
        Some(data) => format!(
            "CHARTDECK v{} - {} ({} records)",
            version,
            data.file_name,
            data.records.len()
        ),
        None => format!("CHARTDECK v{}", version),
    };

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let (progress_text, gauge_color, progress_percent) = match state.analysis_state {
        AnalysisState::Analyzing => {
            // Loops every 20 ticks
            let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
            (
                "ANALYZING - Generating insights".to_string(),
                Color::LightYellow,
                progress,
            )
        }
        AnalysisState::Ready => {
            let text = match &state.report {
                Some(report) => format!(
                    "READY - {} severity, {:.0}% confidence",
                    report.severity, report.confidence
                ),
                None => "READY".to_string(),
            };
            (text, Color::LightGreen, 100)
        }
        AnalysisState::Failed => (
            "FAILED - Showing local analysis, press [I] to retry".to_string(),
            Color::LightRed,
            100,
        ),
        AnalysisState::Idle if state.data.is_some() => (
            "IDLE - Press [I] to analyze".to_string(),
            Color::LightBlue,
            0,
        ),
        AnalysisState::Idle => (
            "IDLE - Start with --data FILE to analyze".to_string(),
            Color::DarkGray,
            0,
        ),
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}
