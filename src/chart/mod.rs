//! Chart scale/zoom engine
//!
//! Charts turn a small dataset into a [`Scene`]: a flat list of screen-space
//! shapes inside a fixed pixel canvas. Every redraw rebuilds the scene from
//! scratch.

pub mod bar;
pub mod data;
pub mod line;
pub mod scale;
pub mod zoom;

pub use bar::{BarChart, BarRange};
pub use data::{BarDatum, LineDatum};
pub use line::{LineChart, TimeExtent};

/// Canvas margins in pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Fixed canvas size plus margins.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl ChartDimensions {
    pub const fn new(width: f64, height: f64, margin: Margin) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// Drawing width after subtracting left and right margins, never negative.
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::new(320.0, 180.0, Margin::new(8.0, 12.0, 25.0, 30.0))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// One drawable element. Coordinates are canvas pixels, y grows downwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Bar {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        label: String,
        value: f64,
    },
    /// Connected line through the points, in order.
    Path { points: Vec<(f64, f64)> },
    Marker { x: f64, y: f64, radius: f64 },
    /// Axis tick. `position` is x for the X axis, y for the Y axis.
    Tick {
        axis: Axis,
        position: f64,
        label: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn empty(dims: &ChartDimensions) -> Self {
        Self {
            width: dims.width,
            height: dims.height,
            shapes: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn bars(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Bar { .. }))
    }

    pub fn markers(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Marker { .. }))
    }

    pub fn ticks(&self, axis: Axis) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(move |s| matches!(s, Shape::Tick { axis: a, .. } if *a == axis))
    }
}
