//! Widget model
//!
//! A widget is one chart card in the dashboard grid.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The chart drawn inside a widget card.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

impl ChartKind {
    /// The other chart kind, used by the toggle action.
    pub fn toggled(self) -> Self {
        match self {
            ChartKind::Line => ChartKind::Bar,
            ChartKind::Bar => ChartKind::Line,
        }
    }
}

/// Display size tier of a widget card.
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WidgetSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl WidgetSize {
    /// Next size in the small -> medium -> large cycle.
    pub fn cycled(self) -> Self {
        match self {
            WidgetSize::Small => WidgetSize::Medium,
            WidgetSize::Medium => WidgetSize::Large,
            WidgetSize::Large => WidgetSize::Small,
        }
    }

    /// Single-letter badge shown in the card header.
    pub fn badge(self) -> &'static str {
        match self {
            WidgetSize::Small => "S",
            WidgetSize::Medium => "M",
            WidgetSize::Large => "L",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub subtitle: Option<String>,
    pub size: WidgetSize,
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
    /// Hex color such as `#3b82f6`.
    pub color: Option<String>,
}

impl Widget {
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: ChartKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            subtitle: None,
            size: WidgetSize::default(),
            x_axis: None,
            y_axis: None,
            color: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_size(mut self, size: WidgetSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_axes(mut self, x_axis: impl Into<String>, y_axis: impl Into<String>) -> Self {
        self.x_axis = Some(x_axis.into());
        self.y_axis = Some(y_axis.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Merge the populated fields of `patch` into this widget. The id never changes.
    pub fn apply(&mut self, patch: WidgetPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(subtitle) = patch.subtitle {
            self.subtitle = Some(subtitle);
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(x_axis) = patch.x_axis {
            self.x_axis = Some(x_axis);
        }
        if let Some(y_axis) = patch.y_axis {
            self.y_axis = Some(y_axis);
        }
        if let Some(color) = patch.color {
            self.color = Some(color);
        }
    }

    /// Parse the widget color into RGB components.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(self.color.as_deref()?)
    }
}

/// Partial widget update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetPatch {
    pub title: Option<String>,
    pub kind: Option<ChartKind>,
    pub subtitle: Option<String>,
    pub size: Option<WidgetSize>,
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
    pub color: Option<String>,
}

impl WidgetPatch {
    pub fn size(size: WidgetSize) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    pub fn kind(kind: ChartKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }
}

/// Parse `#rrggbb` (leading `#` optional) into RGB components.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// The layout the dashboard starts with and returns to on reset.
pub fn default_layout() -> Vec<Widget> {
    vec![
        Widget::new("widget-1", "Revenue Trend", ChartKind::Line)
            .with_subtitle("Monthly revenue growth")
            .with_size(WidgetSize::Medium)
            .with_axes("Month", "Revenue ($)")
            .with_color("#3b82f6"),
        Widget::new("widget-2", "Sales by Quarter", ChartKind::Bar)
            .with_subtitle("Quarterly sales data")
            .with_size(WidgetSize::Medium)
            .with_axes("Quarter", "Sales Count")
            .with_color("#10b981"),
        Widget::new("widget-3", "User Activity", ChartKind::Line)
            .with_subtitle("Daily active users")
            .with_size(WidgetSize::Small)
            .with_axes("Date", "Active Users")
            .with_color("#f59e0b"),
        Widget::new("widget-4", "Product Performance", ChartKind::Bar)
            .with_subtitle("Top performing products")
            .with_size(WidgetSize::Large)
            .with_axes("Product", "Performance Score")
            .with_color("#8b5cf6"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn patch_merges_only_populated_fields() {
        let mut widget = Widget::new("w", "Old", ChartKind::Line).with_subtitle("keep me");
        widget.apply(WidgetPatch {
            title: Some("New".to_string()),
            size: Some(WidgetSize::Large),
            ..WidgetPatch::default()
        });

        assert_eq!(widget.id, "w");
        assert_eq!(widget.title, "New");
        assert_eq!(widget.size, WidgetSize::Large);
        assert_eq!(widget.kind, ChartKind::Line);
        assert_eq!(widget.subtitle.as_deref(), Some("keep me"));
    }

    #[test]
    fn size_cycles_through_all_tiers() {
        let start = WidgetSize::Small;
        assert_eq!(start.cycled(), WidgetSize::Medium);
        assert_eq!(start.cycled().cycled(), WidgetSize::Large);
        assert_eq!(start.cycled().cycled().cycled(), WidgetSize::Small);
    }

    #[test]
    fn kinds_parse_from_lowercase_tags() {
        assert_eq!(ChartKind::from_str("line").unwrap(), ChartKind::Line);
        assert_eq!(ChartKind::from_str("bar").unwrap(), ChartKind::Bar);
        assert!(ChartKind::from_str("pie").is_err());
        assert_eq!(ChartKind::Bar.to_string(), "bar");
    }

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex_color("#3b82f6"), Some((0x3b, 0x82, 0xf6)));
        assert_eq!(parse_hex_color("10b981"), Some((0x10, 0xb9, 0x81)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn default_layout_has_unique_ids() {
        let layout = default_layout();
        let mut ids: Vec<_> = layout.iter().map(|w| w.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), layout.len());
    }
}
