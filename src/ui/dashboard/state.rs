//! Dashboard state management
//!
//! Contains the main dashboard state struct and related enums

use crate::analysis::{AnalysisReport, Insight};
use crate::config::Config;
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::events::{AnalysisState, Event as DashboardEvent};
use crate::upload::Record;
use crate::widgets::{DragController, WidgetChart, WidgetList};

use ratatui::layout::Rect;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Instant;

/// The uploaded dataset, shared with background analysis.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub file_name: String,
    pub records: Arc<Vec<Record>>,
    pub insights: Vec<Insight>,
}

/// Dashboard state: widget grid, interaction and analysis panel.
#[derive(Debug)]
pub struct DashboardState {
    /// The start time of the application.
    pub start_time: Instant,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Initial bar window for new bar charts.
    pub bar_window: usize,

    /// Cards in display order.
    pub widgets: WidgetList,
    /// Chart backing each card, keyed by widget id.
    pub charts: HashMap<String, WidgetChart>,
    /// Index of the focused card.
    pub focus: usize,
    pub drag: DragController,
    /// Area of the widget grid in the last frame, for mouse hit testing.
    pub grid_area: Rect,

    pub data: Option<LoadedData>,
    pub analysis_state: AnalysisState,
    pub report: Option<AnalysisReport>,
    /// Inline, dismissible analysis error.
    pub analysis_error: Option<String>,
    /// Blocking alert shown over the dashboard.
    pub modal_error: Option<String>,

    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<DashboardEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<DashboardEvent>,
    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    pub fn new(config: &Config, start_time: Instant) -> Self {
        let mut state = Self {
            start_time,
            with_background_color: config.with_background_color,
            bar_window: config.bar_window,
            widgets: WidgetList::default(),
            charts: HashMap::new(),
            focus: 0,
            drag: DragController::new(f64::from(config.drag_activation_distance)),
            grid_area: Rect::default(),
            data: None,
            analysis_state: AnalysisState::Idle,
            report: None,
            analysis_error: None,
            modal_error: None,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            tick: 0,
        };
        state.sync_charts();
        state
    }

    /// Id of the focused card.
    pub fn focused_id(&self) -> Option<String> {
        self.widgets.get(self.focus).map(|w| w.id.clone())
    }

    pub fn focused_chart_mut(&mut self) -> Option<&mut WidgetChart> {
        let id = self.focused_id()?;
        self.charts.get_mut(&id)
    }

    /// Rebuild, resize or drop charts so they match the widget list.
    pub fn sync_charts(&mut self) {
        let mut rng = rand::thread_rng();
        for widget in self.widgets.iter() {
            match self.charts.get_mut(&widget.id) {
                Some(chart) if chart.kind() == widget.kind => chart.resize(widget.size),
                _ => {
                    let chart = WidgetChart::for_widget(widget, self.bar_window, &mut rng);
                    self.charts.insert(widget.id.clone(), chart);
                }
            }
        }
        let ids = self.widgets.ids();
        self.charts.retain(|id, _| ids.contains(id));
        self.focus = self.focus.min(self.widgets.len().saturating_sub(1));
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: DashboardEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: DashboardEvent) {
        self.pending_events.push_back(event);
    }
}
