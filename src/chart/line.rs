//! Zoomable time-series line chart.

use super::data::{LineDatum, format_day};
use super::scale::{LinearScale, MS_PER_DAY, TimeScale, format_tick};
use super::zoom::ZoomTransform;
use super::{Axis, ChartDimensions, Scene, Shape};
use std::fmt;

pub const ZOOM_EXTENT: (f64, f64) = (1.0, 10.0);
pub const MARKER_RADIUS: f64 = 4.0;

/// Inclusive time window in milliseconds since the epoch.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimeExtent {
    pub start: i64,
    pub end: i64,
}

impl TimeExtent {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, t: i64) -> bool {
        self.start <= t && t <= self.end
    }

    pub fn days(&self) -> f64 {
        (self.end - self.start) as f64 / MS_PER_DAY as f64
    }
}

/// `None` signals "full extent" after a reset.
pub type ExtentCallback = Box<dyn FnMut(Option<TimeExtent>) + Send>;

pub struct LineChart {
    data: Vec<LineDatum>,
    dims: ChartDimensions,
    internal: Option<TimeExtent>,
    external: Option<TimeExtent>,
    transform: ZoomTransform,
    interactive: bool,
    on_zoom_change: Option<ExtentCallback>,
}

impl fmt::Debug for LineChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineChart")
            .field("data", &self.data.len())
            .field("extent", &self.current_extent())
            .field("transform", &self.transform)
            .finish()
    }
}

impl LineChart {
    pub fn new(data: Vec<LineDatum>, dims: ChartDimensions) -> Self {
        Self {
            data,
            dims,
            internal: None,
            external: None,
            transform: ZoomTransform::IDENTITY,
            interactive: true,
            on_zoom_change: None,
        }
    }

    pub fn data(&self) -> &[LineDatum] {
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

    pub fn set_zoom_extent(&mut self, extent: Option<TimeExtent>) {
        self.external = extent;
    }

    pub fn on_zoom_change(&mut self, callback: ExtentCallback) {
        self.on_zoom_change = Some(callback);
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Earliest and latest timestamps in the data.
    pub fn full_extent(&self) -> Option<TimeExtent> {
        let mut stamps = self.data.iter().map(LineDatum::timestamp_millis);
        let first = stamps.next()?;
        let (min, max) = stamps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        Some(TimeExtent::new(min, max))
    }

    /// Visible time window: external, then internal, then the full extent.
    pub fn current_extent(&self) -> Option<TimeExtent> {
        self.external.or(self.internal).or_else(|| self.full_extent())
    }

    pub fn zoom(&mut self, factor: f64, anchor: f64) {
        if !self.interactive {
            return;
        }
        let anchor = anchor - self.dims.margin.left;
        let transform = self.transform.scale_by(factor, anchor, ZOOM_EXTENT);
        self.apply_transform(transform);
    }

    /// Pan by `dx` pixels; negative values move towards later dates.
    pub fn pan(&mut self, dx: f64) {
        if !self.interactive {
            return;
        }
        let transform = self.transform.translate_by(dx);
        self.apply_transform(transform);
    }

    fn apply_transform(&mut self, transform: ZoomTransform) {
        let Some(full) = self.full_extent() else {
            return;
        };
        let width = self.dims.inner_width();
        self.transform = transform.constrain(width);

        let base = TimeScale::new((full.start, full.end), (0.0, width));
        let start = base.invert(self.transform.invert_x(0.0));
        let end = base.invert(self.transform.invert_x(width));
        self.emit(Some(TimeExtent::new(start, end)));
    }

    pub fn reset(&mut self) {
        self.transform = ZoomTransform::IDENTITY;
        self.emit(None);
    }

    fn emit(&mut self, extent: Option<TimeExtent>) {
        self.internal = extent;
        if let Some(callback) = self.on_zoom_change.as_mut() {
            callback(extent);
        }
    }

    /// Ticks scale with the visible span: one per two days, between 3 and 10.
    pub fn tick_count(extent: TimeExtent) -> usize {
        ((extent.days() / 2.0).floor() as usize).clamp(3, 10)
    }

    pub fn render(&self) -> Scene {
        let mut scene = Scene::empty(&self.dims);
        let Some(extent) = self.current_extent() else {
            return scene;
        };

        let inner_width = self.dims.inner_width();
        let inner_height = self.dims.inner_height();
        let left = self.dims.margin.left;
        let top = self.dims.margin.top;

        let x = TimeScale::new((extent.start, extent.end), (0.0, inner_width));
        let visible: Vec<&LineDatum> = self
            .data
            .iter()
            .filter(|d| extent.contains(d.timestamp_millis()))
            .collect();

        if !visible.is_empty() {
            let (lo, hi) = visible
                .iter()
                .map(|d| d.value)
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
            let y = LinearScale::new((lo, hi), (inner_height, 0.0)).nice();

            let points: Vec<(f64, f64)> = visible
                .iter()
                .map(|d| {
                    (
                        left + x.scale(d.timestamp_millis()),
                        top + y.scale(d.value),
                    )
                })
                .collect();
            scene.shapes.push(Shape::Path {
                points: points.clone(),
            });
            scene
                .shapes
                .extend(points.into_iter().map(|(px, py)| Shape::Marker {
                    x: px,
                    y: py,
                    radius: MARKER_RADIUS,
                }));
            for value in y.ticks(10) {
                scene.shapes.push(Shape::Tick {
                    axis: Axis::Y,
                    position: top + y.scale(value),
                    label: format_tick(value),
                });
            }
        }

        for t in x.ticks(Self::tick_count(extent)) {
            scene.shapes.push(Shape::Tick {
                axis: Axis::X,
                position: left + x.scale(t),
                label: format_day(t),
            });
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Margin;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};

    fn dims() -> ChartDimensions {
        ChartDimensions::new(450.0, 320.0, Margin::new(8.0, 16.0, 70.0, 40.0))
    }

    fn days(values: &[f64]) -> Vec<LineDatum> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        start
            .iter_days()
            .zip(values)
            .map(|(date, v)| LineDatum::new(date, *v))
            .collect()
    }

    #[test]
    fn markers_match_visible_points() {
        let chart = LineChart::new(days(&[10.0, 40.0, 25.0, 60.0]), dims());
        let scene = chart.render();
        assert_eq!(scene.markers().count(), 4);
        assert!(scene.markers().all(|m| matches!(m, Shape::Marker { radius, .. } if *radius == 4.0)));
    }

    #[test]
    fn empty_data_renders_nothing() {
        let chart = LineChart::new(Vec::new(), dims());
        assert!(chart.render().is_empty());
        assert_eq!(chart.current_extent(), None);
    }

    #[test]
    fn single_point_renders_without_nan() {
        let chart = LineChart::new(days(&[42.0]), dims());
        let scene = chart.render();
        assert_eq!(scene.markers().count(), 1);
        for shape in &scene.shapes {
            if let Shape::Marker { x, y, .. } = shape {
                assert!(x.is_finite() && y.is_finite());
            }
        }
    }

    #[test]
    fn tick_count_follows_visible_days() {
        let day = MS_PER_DAY;
        assert_eq!(LineChart::tick_count(TimeExtent::new(0, 2 * day)), 3);
        assert_eq!(LineChart::tick_count(TimeExtent::new(0, 9 * day)), 4);
        assert_eq!(LineChart::tick_count(TimeExtent::new(0, 60 * day)), 10);

        let chart = LineChart::new(days(&[1.0; 10]), dims());
        assert_eq!(chart.render().ticks(Axis::X).count(), 4);
    }

    #[test]
    fn zoom_narrows_extent_within_full_domain() {
        let mut chart = LineChart::new(days(&[5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0]), dims());
        let full = chart.full_extent().unwrap();
        chart.zoom(2.0, 40.0);

        let zoomed = chart.current_extent().unwrap();
        assert_eq!(zoomed.start, full.start);
        assert!(zoomed.end < full.end);
        assert!(chart.render().markers().count() < 10);

        chart.pan(-10_000.0);
        let panned = chart.current_extent().unwrap();
        assert_eq!(panned.end, full.end);
        assert!(panned.start > full.start);

        chart.zoom(100.0, 200.0);
        assert_eq!(chart.transform().k, 10.0);
    }

    #[test]
    fn reset_reports_full_extent() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut chart = LineChart::new(days(&[1.0, 2.0, 3.0, 4.0]), dims());
        chart.on_zoom_change(Box::new(move |e| sink.lock().unwrap().push(e)));

        chart.zoom(2.0, 40.0);
        chart.reset();
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].is_some());
        assert_eq!(seen[1], None);
        assert_eq!(chart.current_extent(), chart.full_extent());
        assert!(chart.transform().is_identity());
    }

    #[test]
    fn external_extent_controls_rendering() {
        let data = days(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let mut chart = LineChart::new(data.clone(), dims());
        let window = TimeExtent::new(data[1].timestamp_millis(), data[2].timestamp_millis());
        chart.set_zoom_extent(Some(window));
        assert_eq!(chart.render().markers().count(), 2);
    }
}
