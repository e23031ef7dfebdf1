//! Windowed bar chart
//!
//! Only a contiguous window of categories is drawn at a time. Zoom changes how
//! many categories fit in the window; pan and the prev/next controls move it.
//! The value axis always spans the full dataset so bars keep a stable height
//! while the window moves.

use super::scale::{BandScale, LinearScale, format_tick};
use super::zoom::ZoomTransform;
use super::{Axis, BarDatum, ChartDimensions, Scene, Shape};
use std::fmt;

/// Zoom scale bounds.
pub const ZOOM_EXTENT: (f64, f64) = (1.0, 4.0);
/// Categories shown before any interaction.
pub const DEFAULT_WINDOW: usize = 5;
const MIN_VISIBLE: usize = 3;
const BAND_PADDING: f64 = 0.1;

/// Half-open index window `[start, end)` into the data.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BarRange {
    pub start: usize,
    pub end: usize,
}

impl BarRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clip both ends into `[0, len]`.
    pub fn clipped(self, len: usize) -> Self {
        let start = self.start.min(len);
        Self {
            start,
            end: self.end.clamp(start, len),
        }
    }
}

pub type RangeCallback = Box<dyn FnMut(BarRange) + Send>;

pub struct BarChart {
    data: Vec<BarDatum>,
    dims: ChartDimensions,
    window: usize,
    internal: BarRange,
    external: Option<BarRange>,
    transform: ZoomTransform,
    interactive: bool,
    on_range_change: Option<RangeCallback>,
}

impl fmt::Debug for BarChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarChart")
            .field("data", &self.data.len())
            .field("range", &self.current_range())
            .field("transform", &self.transform)
            .field("interactive", &self.interactive)
            .finish()
    }
}

impl BarChart {
    pub fn new(data: Vec<BarDatum>, dims: ChartDimensions) -> Self {
        Self::with_window(data, dims, DEFAULT_WINDOW)
    }

    /// Like [`BarChart::new`] with a custom initial window size.
    pub fn with_window(data: Vec<BarDatum>, dims: ChartDimensions, window: usize) -> Self {
        let window = window.max(1);
        let internal = BarRange::new(0, data.len().min(window));
        Self {
            data,
            dims,
            window,
            internal,
            external: None,
            transform: ZoomTransform::IDENTITY,
            interactive: true,
            on_range_change: None,
        }
    }

    pub fn data(&self) -> &[BarDatum] {
        &self.data
    }

    pub fn dimensions(&self) -> ChartDimensions {
        self.dims
    }

    pub fn set_dimensions(&mut self, dims: ChartDimensions) {
        self.dims = dims;
    }

    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    /// Hand range ownership to the caller. `None` returns it to the chart.
    pub fn set_visible_range(&mut self, range: Option<BarRange>) {
        self.external = range;
    }

    pub fn on_range_change(&mut self, callback: RangeCallback) {
        self.on_range_change = Some(callback);
    }

    /// Zoom and pan are ignored while not interactive (e.g. during a card drag).
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// The window currently drawn: the external range when set, else the internal one.
    pub fn current_range(&self) -> BarRange {
        self.external.unwrap_or(self.internal)
    }

    /// Zoom by `factor` around the canvas x position `anchor`.
    pub fn zoom(&mut self, factor: f64, anchor: f64) {
        if !self.interactive {
            return;
        }
        let anchor = anchor - self.dims.margin.left;
        let transform = self.transform.scale_by(factor, anchor, ZOOM_EXTENT);
        self.apply_transform(transform);
    }

    /// Pan by `dx` pixels. Negative values move the window towards later items.
    pub fn pan(&mut self, dx: f64) {
        if !self.interactive {
            return;
        }
        let transform = self.transform.translate_by(dx);
        self.apply_transform(transform);
    }

    fn apply_transform(&mut self, transform: ZoomTransform) {
        self.transform = transform;
        let range = self.window_for(transform);
        if range != self.current_range() {
            self.emit(range);
        }
    }

    /// Window implied by a zoom transform.
    pub fn window_for(&self, transform: ZoomTransform) -> BarRange {
        let visible = MIN_VISIBLE.max((self.window as f64 / transform.k).ceil() as usize);
        let max_start = self.data.len().saturating_sub(visible);
        let span = self.dims.inner_width() * transform.k;
        let progress = if span > 0.0 {
            (-transform.x / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let start = (progress * max_start as f64).floor() as usize;
        BarRange::new(start, start + visible).clipped(self.data.len())
    }

    /// Shift the window one item towards the start.
    pub fn previous(&mut self) {
        let current = self.current_range();
        let start = current.start.saturating_sub(1);
        let end = (start + current.len()).min(self.data.len());
        self.emit(BarRange::new(start, end));
    }

    /// Shift the window one item towards the end.
    pub fn next(&mut self) {
        let current = self.current_range();
        let size = current.len();
        let start = (current.start + 1).min(self.data.len().saturating_sub(size));
        let end = (start + size).min(self.data.len());
        self.emit(BarRange::new(start, end));
    }

    pub fn reset(&mut self) {
        self.transform = ZoomTransform::IDENTITY;
        self.emit(BarRange::new(0, self.data.len().min(self.window)));
    }

    /// Show `size` items starting at `start`, clipped to the data.
    pub fn show_window(&mut self, start: usize, size: usize) {
        let range = BarRange::new(start, start.saturating_add(size)).clipped(self.data.len());
        self.emit(range);
    }

    /// The internal range always follows so the chart works uncontrolled;
    /// the callback fires either way.
    fn emit(&mut self, range: BarRange) {
        self.internal = range;
        if let Some(callback) = self.on_range_change.as_mut() {
            callback(range);
        }
    }

    pub fn render(&self) -> Scene {
        let mut scene = Scene::empty(&self.dims);
        if self.data.is_empty() {
            return scene;
        }

        let range = self.current_range().clipped(self.data.len());
        let visible = &self.data[range.start..range.end];
        let inner_width = self.dims.inner_width();
        let inner_height = self.dims.inner_height();
        let left = self.dims.margin.left;
        let top = self.dims.margin.top;

        let band = BandScale::new(
            visible.iter().map(|d| d.label.clone()).collect(),
            (0.0, inner_width),
            BAND_PADDING,
        );
        let max = self.data.iter().map(|d| d.value).fold(0.0, f64::max);
        let y = LinearScale::new((0.0, if max > 0.0 { max } else { 1.0 }), (inner_height, 0.0))
            .nice();

        let bandwidth = band.bandwidth();
        for (i, datum) in visible.iter().enumerate() {
            let x = band.position_at(i).unwrap_or(0.0);
            let bar_top = y.scale(datum.value);
            scene.shapes.push(Shape::Bar {
                x: left + x,
                y: top + bar_top,
                width: bandwidth,
                height: inner_height - bar_top,
                label: datum.label.clone(),
                value: datum.value,
            });
            scene.shapes.push(Shape::Tick {
                axis: Axis::X,
                position: left + x + bandwidth / 2.0,
                label: datum.label.clone(),
            });
        }
        for value in y.ticks(10) {
            scene.shapes.push(Shape::Tick {
                axis: Axis::Y,
                position: top + y.scale(value),
                label: format_tick(value),
            });
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Margin;
    use crate::chart::data::sample_bar_data;
    use std::sync::{Arc, Mutex};

    fn dims() -> ChartDimensions {
        ChartDimensions::new(450.0, 320.0, Margin::new(8.0, 16.0, 65.0, 40.0))
    }

    fn numbered(n: usize) -> Vec<BarDatum> {
        (0..n)
            .map(|i| BarDatum::new(format!("c{}", i), (i + 1) as f64))
            .collect()
    }

    #[test]
    fn initial_window_is_first_five() {
        let chart = BarChart::new(sample_bar_data(), dims());
        assert_eq!(chart.current_range(), BarRange::new(0, 5));
        assert_eq!(chart.render().bars().count(), 5);

        let short = BarChart::new(numbered(2), dims());
        assert_eq!(short.current_range(), BarRange::new(0, 2));
    }

    #[test]
    fn empty_data_renders_empty_scene() {
        let chart = BarChart::new(Vec::new(), dims());
        assert!(chart.render().is_empty());
    }

    #[test]
    fn value_axis_uses_full_data_max() {
        let mut chart = BarChart::new(sample_bar_data(), dims());
        chart.show_window(4, 2);
        let scene = chart.render();
        let inner_height = dims().inner_height();
        // domain [0, 81] nices to [0, 90]; "May" = 56
        let bar = scene.bars().next().unwrap();
        if let Shape::Bar { height, label, .. } = bar {
            assert_eq!(label, "May");
            assert!((height - inner_height * 56.0 / 90.0).abs() < 1e-9);
        }
    }

    #[test]
    fn bars_fit_inside_canvas() {
        let chart = BarChart::new(sample_bar_data(), dims());
        let scene = chart.render();
        for bar in scene.bars() {
            if let Shape::Bar {
                x,
                y,
                width,
                height,
                ..
            } = bar
            {
                assert!(*x >= 40.0 && x + width <= 450.0 - 16.0 + 1e-9);
                assert!(*y >= 8.0 - 1e-9 && y + height <= 320.0 - 65.0 + 1e-9);
            }
        }
    }

    #[test]
    fn window_is_clipped_to_data() {
        for m in 0..8 {
            for start in 0..10 {
                for size in 0..10 {
                    let mut chart = BarChart::new(numbered(m), dims());
                    chart.show_window(start, size);
                    let r = chart.current_range();
                    assert!(r.start <= r.end && r.end <= m);
                }
            }
        }
    }

    #[test]
    fn zoom_in_shows_fewer_items_but_at_least_three() {
        let mut chart = BarChart::new(numbered(12), dims());
        chart.zoom(2.0, 40.0);
        assert_eq!(chart.current_range().len(), 3);
        chart.zoom(100.0, 40.0);
        assert_eq!(chart.transform().k, 4.0);
        assert_eq!(chart.current_range().len(), 3);
    }

    #[test]
    fn pan_moves_window_proportionally() {
        let mut chart = BarChart::new(numbered(12), dims());
        let inner = dims().inner_width();
        chart.pan(-inner / 2.0);
        // 12 - 5 = 7 possible starts, halfway = floor(3.5)
        assert_eq!(chart.current_range(), BarRange::new(3, 8));
        chart.pan(-inner * 10.0);
        assert_eq!(chart.current_range(), BarRange::new(7, 12));
        chart.pan(inner * 100.0);
        assert_eq!(chart.current_range(), BarRange::new(0, 5));
    }

    #[test]
    fn prev_and_next_clamp_at_edges() {
        let mut chart = BarChart::new(sample_bar_data(), dims());
        chart.previous();
        assert_eq!(chart.current_range(), BarRange::new(0, 5));
        chart.next();
        assert_eq!(chart.current_range(), BarRange::new(1, 6));
        chart.next();
        assert_eq!(chart.current_range(), BarRange::new(1, 6));
        chart.reset();
        assert_eq!(chart.current_range(), BarRange::new(0, 5));
    }

    #[test]
    fn external_range_wins_and_callback_still_fires() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut chart = BarChart::new(sample_bar_data(), dims());
        chart.on_range_change(Box::new(move |r| sink.lock().unwrap().push(r)));
        chart.set_visible_range(Some(BarRange::new(2, 4)));
        assert_eq!(chart.current_range(), BarRange::new(2, 4));

        chart.next();
        assert_eq!(chart.current_range(), BarRange::new(2, 4));
        assert_eq!(*seen.lock().unwrap(), vec![BarRange::new(3, 5)]);

        chart.set_visible_range(None);
        assert_eq!(chart.current_range(), BarRange::new(3, 5));
    }

    #[test]
    fn non_interactive_chart_ignores_zoom() {
        let mut chart = BarChart::new(numbered(12), dims());
        chart.set_interactive(false);
        chart.zoom(4.0, 100.0);
        chart.pan(-500.0);
        assert!(chart.transform().is_identity());
        assert_eq!(chart.current_range(), BarRange::new(0, 5));
    }
}
