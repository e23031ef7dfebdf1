//! Dashboard widgets: the model, the ordered list, drag handling and chart dispatch.

pub mod drag;
pub mod list;
pub mod renderer;
pub mod widget;

pub use drag::{DragController, PointerPos, ReorderInstruction};
pub use list::WidgetList;
pub use renderer::{GRID_COLUMNS, WidgetChart, dimensions, grid_span};
pub use widget::{ChartKind, Widget, WidgetPatch, WidgetSize};
