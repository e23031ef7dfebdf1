//! Widget → chart dispatch
//!
//! Picks canvas dimensions from the widget's size tier and builds the chart
//! for its kind.

use super::widget::{ChartKind, Widget, WidgetSize};
use crate::chart::data::{format_day, sample_bar_data, sample_line_data};
use crate::chart::{BarChart, ChartDimensions, LineChart, Margin, Scene};
use rand::Rng;

/// Columns in the dashboard grid.
pub const GRID_COLUMNS: u16 = 12;

/// Canvas size and margins for a chart of `kind` at `size`.
pub fn dimensions(kind: ChartKind, size: WidgetSize) -> ChartDimensions {
    let (width, height, right, left) = match size {
        WidgetSize::Small => (300.0, 240.0, 12.0, 30.0),
        WidgetSize::Medium => (450.0, 320.0, 16.0, 40.0),
        WidgetSize::Large => (700.0, 420.0, 16.0, 50.0),
    };
    let bottom = match (kind, size) {
        (ChartKind::Line, WidgetSize::Small) => 80.0,
        (ChartKind::Line, WidgetSize::Medium) => 70.0,
        (ChartKind::Line, WidgetSize::Large) => 80.0,
        (ChartKind::Bar, WidgetSize::Medium) => 65.0,
        (ChartKind::Bar, _) => 75.0,
    };
    ChartDimensions::new(width, height, Margin::new(8.0, right, bottom, left))
}

/// Grid columns taken by a card of `size`.
pub fn grid_span(size: WidgetSize) -> u16 {
    match size {
        WidgetSize::Small => 4,
        WidgetSize::Medium => 6,
        WidgetSize::Large => GRID_COLUMNS,
    }
}

/// Chart instance backing one widget card.
#[derive(Debug)]
pub enum WidgetChart {
    Line(LineChart),
    Bar(BarChart),
}

impl WidgetChart {
    /// Build the chart for `widget` over freshly generated sample data.
    pub fn for_widget<R: Rng + ?Sized>(widget: &Widget, bar_window: usize, rng: &mut R) -> Self {
        let dims = dimensions(widget.kind, widget.size);
        match widget.kind {
            ChartKind::Line => WidgetChart::Line(LineChart::new(sample_line_data(rng), dims)),
            ChartKind::Bar => {
                WidgetChart::Bar(BarChart::with_window(sample_bar_data(), dims, bar_window))
            }
        }
    }

    pub fn kind(&self) -> ChartKind {
        match self {
            WidgetChart::Line(_) => ChartKind::Line,
            WidgetChart::Bar(_) => ChartKind::Bar,
        }
    }

    /// Keep the chart's viewport but adopt the canvas of a new size tier.
    pub fn resize(&mut self, size: WidgetSize) {
        let dims = dimensions(self.kind(), size);
        match self {
            WidgetChart::Line(chart) => chart.set_dimensions(dims),
            WidgetChart::Bar(chart) => chart.set_dimensions(dims),
        }
    }

    pub fn render(&self) -> Scene {
        match self {
            WidgetChart::Line(chart) => chart.render(),
            WidgetChart::Bar(chart) => chart.render(),
        }
    }

    /// Zoom around the middle of the plot area.
    pub fn zoom(&mut self, factor: f64) {
        match self {
            WidgetChart::Line(chart) => {
                let anchor = plot_center(&chart.dimensions());
                chart.zoom(factor, anchor)
            }
            WidgetChart::Bar(chart) => {
                let anchor = plot_center(&chart.dimensions());
                chart.zoom(factor, anchor)
            }
        }
    }

    pub fn pan(&mut self, dx: f64) {
        match self {
            WidgetChart::Line(chart) => chart.pan(dx),
            WidgetChart::Bar(chart) => chart.pan(dx),
        }
    }

    /// Previous window. Line charts have no windowing.
    pub fn previous(&mut self) {
        if let WidgetChart::Bar(chart) = self {
            chart.previous();
        }
    }

    pub fn next(&mut self) {
        if let WidgetChart::Bar(chart) = self {
            chart.next();
        }
    }

    pub fn reset(&mut self) {
        match self {
            WidgetChart::Line(chart) => chart.reset(),
            WidgetChart::Bar(chart) => chart.reset(),
        }
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        match self {
            WidgetChart::Line(chart) => chart.set_interactive(interactive),
            WidgetChart::Bar(chart) => chart.set_interactive(interactive),
        }
    }

    /// Short description of the current viewport for the card footer.
    pub fn viewport_label(&self) -> String {
        match self {
            WidgetChart::Bar(chart) => {
                let range = chart.current_range();
                format!(
                    "items {}-{} of {}",
                    range.start + 1,
                    range.end,
                    chart.data().len()
                )
            }
            WidgetChart::Line(chart) => match chart.current_extent() {
                Some(extent) => format!(
                    "{} - {}  zoom {:.1}x",
                    format_day(extent.start),
                    format_day(extent.end),
                    chart.transform().k
                ),
                None => "no data".to_string(),
            },
        }
    }
}

fn plot_center(dims: &ChartDimensions) -> f64 {
    dims.margin.left + dims.inner_width() / 2.0
}
