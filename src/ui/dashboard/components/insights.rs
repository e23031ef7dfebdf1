//! Insights and analysis panel component

use super::super::state::DashboardState;
use crate::analysis::{InsightKind, Severity};
use crate::events::AnalysisState;

use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn insight_color(kind: InsightKind) -> Color {
    match kind {
        InsightKind::Info => Color::LightBlue,
        InsightKind::Success => Color::LightGreen,
        InsightKind::Warning => Color::LightYellow,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Low => Color::LightGreen,
        Severity::Medium => Color::LightYellow,
        Severity::High => Color::LightRed,
    }
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Render quick insights followed by the analysis report.
pub fn render_insights_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let mut lines: Vec<Line> = Vec::new();

    match &state.data {
        None => lines.push(Line::from(Span::styled(
            "No data loaded. Run `chartdeck dashboard --data FILE` with a CSV or JSON file.",
            Style::default().fg(Color::DarkGray),
        ))),
        Some(data) => {
            for insight in &data.insights {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{}: ", insight.title),
                        Style::default()
                            .fg(insight_color(insight.kind))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(insight.description.clone()),
                ]));
            }
        }
    }

    if let Some(error) = &state.analysis_error {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                format!("Error: {} ", error),
                Style::default().fg(Color::LightRed),
            ),
            Span::styled("[I] Retry [E] Dismiss", Style::default().fg(Color::DarkGray)),
        ]));
    }

    if state.analysis_state == AnalysisState::Analyzing {
        let dots = ".".repeat(state.tick / 5 % 4);
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Analyzing{}", dots),
            Style::default().fg(Color::LightYellow),
        )));
    } else if let Some(report) = &state.report {
        lines.push(Line::from(""));
        lines.push(heading("ANALYSIS"));
        lines.push(Line::from(report.narrative.clone()));
        lines.push(Line::from(vec![
            Span::raw("Severity: "),
            Span::styled(
                report.severity.to_string(),
                Style::default()
                    .fg(severity_color(report.severity))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  Confidence: {:.0}%", report.confidence)),
        ]));
        if !report.root_causes.is_empty() {
            lines.push(heading("Root causes"));
            lines.extend(
                report
                    .root_causes
                    .iter()
                    .map(|cause| Line::from(format!("• {}", cause))),
            );
        }
        if !report.recommendations.is_empty() {
            lines.push(heading("Recommendations"));
            lines.extend(
                report
                    .recommendations
                    .iter()
                    .map(|rec| Line::from(format!("• {}", rec))),
            );
        }
    }

    let block = Block::default()
        .title("INSIGHTS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
