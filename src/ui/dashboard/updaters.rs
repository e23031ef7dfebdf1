//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from events and user
//! actions

use super::state::{DashboardState, LoadedData};
use super::utils::{card_at, card_layout};

use crate::analysis::{AnalysisOutcome, insights};
use crate::events::{AnalysisState, Event as DashboardEvent, EventType};
use crate::logging::LogLevel;
use crate::upload::{Dataset, UploadError};
use crate::widgets::{PointerPos, ReorderInstruction, WidgetPatch, WidgetSize};

use ratatui::layout::Rect;
use std::sync::Arc;

impl DashboardState {
    /// Update the dashboard state with a new tick and queued events.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(&event);
            self.add_to_activity_log(event);
        }
    }

    /// Process a single event and update relevant state
    fn process_event(&mut self, event: &DashboardEvent) {
        if event.event_type == EventType::StateChange {
            if let Some(state) = event.analysis_state {
                self.analysis_state = state;
            }
        }
    }

    fn log(&mut self, msg: impl Into<String>, event_type: EventType) {
        self.add_to_activity_log(DashboardEvent::dashboard(msg, event_type));
    }

    // -------------------------------------------------------------------------
    // Widget grid
    // -------------------------------------------------------------------------

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1).min(self.widgets.len().saturating_sub(1));
    }

    pub fn add_widget(&mut self) {
        let id = self.widgets.add();
        self.sync_charts();
        self.focus = self.widgets.len().saturating_sub(1);
        self.log(format!("Added widget {}", id), EventType::Success);
    }

    pub fn remove_focused(&mut self) {
        let Some(id) = self.focused_id() else {
            return;
        };
        self.drag.cancel();
        self.widgets.remove(&id);
        self.sync_charts();
        self.log(format!("Removed widget {}", id), EventType::Refresh);
    }

    pub fn cycle_size(&mut self) {
        let Some(widget) = self.widgets.get(self.focus) else {
            return;
        };
        let (id, size) = (widget.id.clone(), widget.size.cycled());
        self.widgets.resize(&id, size);
        self.sync_charts();
        self.log(format!("Resized {} to {}", id, size), EventType::Refresh);
    }

    pub fn toggle_kind(&mut self) {
        let Some(widget) = self.widgets.get(self.focus) else {
            return;
        };
        let (id, kind) = (widget.id.clone(), widget.kind.toggled());
        self.widgets.update(&id, WidgetPatch::kind(kind));
        self.sync_charts();
        self.log(format!("Switched {} to a {} chart", id, kind), EventType::Refresh);
    }

    pub fn reset_layout(&mut self) {
        self.drag.cancel();
        self.widgets.reset();
        self.charts.clear();
        self.sync_charts();
        self.log("Layout reset", EventType::Refresh);
    }

    // -------------------------------------------------------------------------
    // Chart viewport on the focused card
    // -------------------------------------------------------------------------

    pub fn chart_previous(&mut self) {
        if let Some(chart) = self.focused_chart_mut() {
            chart.previous();
        }
    }

    pub fn chart_next(&mut self) {
        if let Some(chart) = self.focused_chart_mut() {
            chart.next();
        }
    }

    pub fn chart_zoom(&mut self, factor: f64) {
        if let Some(chart) = self.focused_chart_mut() {
            chart.zoom(factor);
        }
    }

    pub fn chart_pan(&mut self, dx: f64) {
        if let Some(chart) = self.focused_chart_mut() {
            chart.pan(dx);
        }
    }

    pub fn chart_reset(&mut self) {
        if let Some(chart) = self.focused_chart_mut() {
            chart.reset();
        }
    }

    // -------------------------------------------------------------------------
    // Drag to reorder
    // -------------------------------------------------------------------------

    /// Current card areas inside the last rendered grid.
    pub fn card_areas(&self) -> Vec<Option<Rect>> {
        let sizes: Vec<WidgetSize> = self.widgets.iter().map(|w| w.size).collect();
        card_layout(self.grid_area, &sizes, self.focus)
    }

    /// Space: pick up the focused card, or drop the carried one.
    pub fn toggle_keyboard_drag(&mut self) {
        if self.drag.is_dragging() {
            let instruction = self.drag.release();
            self.finish_drag(instruction);
        } else if !self.widgets.is_empty() {
            self.drag.pick_up(self.focus);
            self.set_charts_interactive(false);
        }
    }

    /// Arrow keys while carrying a card move its drop position.
    pub fn move_drag_target(&mut self, forward: bool) {
        if forward {
            self.drag.move_down(self.widgets.len());
        } else {
            self.drag.move_up();
        }
        if let Some(target) = self.drag.drop_target() {
            self.focus = target;
        }
    }

    pub fn cancel_drag(&mut self) {
        if self.drag.is_dragging() {
            if let Some(source) = self.drag.active_source() {
                self.focus = source;
            }
            self.drag.cancel();
            self.set_charts_interactive(true);
            self.log("Drag cancelled", EventType::Refresh);
        }
    }

    pub fn pointer_down(&mut self, column: u16, row: u16) {
        if let Some(index) = card_at(&self.card_areas(), column, row) {
            self.focus = index;
            self.drag
                .pointer_down(index, PointerPos::new(f64::from(column), f64::from(row)));
        }
    }

    pub fn pointer_drag(&mut self, column: u16, row: u16) {
        if self
            .drag
            .pointer_move(PointerPos::new(f64::from(column), f64::from(row)))
        {
            self.set_charts_interactive(false);
        }
        if self.drag.is_dragging() {
            let over = card_at(&self.card_areas(), column, row);
            self.drag.drag_over(over);
        }
    }

    pub fn pointer_up(&mut self) {
        let was_dragging = self.drag.is_dragging();
        let instruction = self.drag.pointer_up();
        if was_dragging {
            self.finish_drag(instruction);
        }
    }

    fn finish_drag(&mut self, instruction: Option<ReorderInstruction>) {
        self.set_charts_interactive(true);
        let Some(ReorderInstruction { from, to }) = instruction else {
            return;
        };
        if self.widgets.reorder(from, to) {
            self.focus = to;
            self.log(
                format!("Moved widget from position {} to {}", from + 1, to + 1),
                EventType::Success,
            );
        }
    }

    fn set_charts_interactive(&mut self, interactive: bool) {
        for chart in self.charts.values_mut() {
            chart.set_interactive(interactive);
        }
    }

    // -------------------------------------------------------------------------
    // Upload and analysis
    // -------------------------------------------------------------------------

    /// Take the result of loading a file. Failures raise the blocking alert.
    pub fn load_dataset(&mut self, result: Result<Dataset, UploadError>) -> bool {
        match result {
            Ok(dataset) => {
                let msg = format!(
                    "Loaded {} records from {}",
                    dataset.len(),
                    dataset.file_name
                );
                self.data = Some(LoadedData {
                    insights: insights(&dataset.records),
                    file_name: dataset.file_name,
                    records: Arc::new(dataset.records),
                });
                self.report = None;
                self.analysis_error = None;
                self.analysis_state = AnalysisState::Idle;
                self.add_to_activity_log(DashboardEvent::upload_with_level(
                    msg,
                    EventType::Success,
                    LogLevel::Info,
                ));
                true
            }
            Err(e) => {
                let msg = format!("Error parsing file: {}", e);
                self.add_to_activity_log(DashboardEvent::upload_with_level(
                    msg.clone(),
                    EventType::Error,
                    LogLevel::Error,
                ));
                self.modal_error = Some(msg);
                false
            }
        }
    }

    /// Show the result of the current analysis request.
    pub fn apply_analysis(&mut self, outcome: AnalysisOutcome) {
        match outcome {
            AnalysisOutcome::Completed(report) => {
                self.report = Some(report);
                self.analysis_error = None;
                self.analysis_state = AnalysisState::Ready;
            }
            AnalysisOutcome::Failed { error, fallback } => {
                self.report = Some(fallback);
                self.analysis_error = Some(error.to_string());
                self.analysis_state = AnalysisState::Failed;
            }
        }
    }

    /// `e`: close the alert first, then the inline analysis error.
    pub fn dismiss_error(&mut self) {
        if self.modal_error.take().is_none() {
            self.analysis_error = None;
        }
    }
}
