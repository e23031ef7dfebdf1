//! Dashboard main renderer

use super::components::{footer, header, insights, logs, modal, widget_grid};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

/// Screen regions of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardAreas {
    pub header: Rect,
    pub grid: Rect,
    pub insights: Rect,
    pub logs: Rect,
    pub footer: Rect,
}

pub fn dashboard_areas(area: Rect) -> DashboardAreas {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(area);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(main_chunks[1]);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(content_chunks[1]);

    DashboardAreas {
        header: main_chunks[0],
        grid: content_chunks[0],
        insights: side_chunks[0],
        logs: side_chunks[1],
        footer: main_chunks[2],
    }
}

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let areas = dashboard_areas(f.area());
    header::render_header(f, areas.header, state);
    widget_grid::render_widget_grid(f, areas.grid, state);
    insights::render_insights_panel(f, areas.insights, state);
    logs::render_logs_panel(f, areas.logs, state);
    footer::render_footer(f, areas.footer, state);

    if let Some(message) = &state.modal_error {
        modal::render_error_modal(f, message);
    }
}
