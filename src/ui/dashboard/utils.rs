//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Source;
use crate::widgets::{GRID_COLUMNS, WidgetSize, grid_span};
use ratatui::layout::Rect;
use ratatui::prelude::Color;

/// Get a ratatui color for an event based on where it came from
pub fn get_source_color(source: &Source) -> Color {
    match source {
        Source::Dashboard => Color::Cyan,
        Source::Upload => Color::LightBlue,
        Source::Analysis => Color::Yellow,
        Source::Catalog => Color::Green,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    if let Some(date_part) = timestamp.split(' ').next() {
        if let Some(time_part) = timestamp.split(' ').nth(1) {
            if let Some(month_day) = date_part.get(5..10) {
                if let Some(hour_min) = time_part.get(0..5) {
                    return format!("{} {}", month_day, hour_min);
                }
            }
        }
    }
    timestamp.to_string()
}

/// Card height in terminal rows for a size tier.
pub fn card_height(size: WidgetSize) -> u16 {
    match size {
        WidgetSize::Small => 10,
        WidgetSize::Medium => 12,
        WidgetSize::Large => 15,
    }
}

/// Lay cards out on the 12-column grid, row by row.
///
/// Rows scroll so the focused card stays in view; cards outside the visible
/// rows get `None`.
pub fn card_layout(area: Rect, sizes: &[WidgetSize], focus: usize) -> Vec<Option<Rect>> {
    if area.width == 0 || area.height == 0 {
        return vec![None; sizes.len()];
    }

    // (column, span, row top, height) in unscrolled grid coordinates
    let mut placed = Vec::with_capacity(sizes.len());
    let (mut column, mut row_top, mut row_height) = (0u16, 0u32, 0u32);
    for &size in sizes {
        let span = grid_span(size);
        if column + span > GRID_COLUMNS {
            column = 0;
            row_top += row_height;
            row_height = 0;
        }
        let height = u32::from(card_height(size).min(area.height));
        placed.push((column, span, row_top, height));
        row_height = row_height.max(height);
        column += span;
    }

    let scroll = placed
        .get(focus)
        .map(|&(_, _, top, height)| (top + height).saturating_sub(u32::from(area.height)))
        .unwrap_or(0);
    // Snap to the top of the row holding that offset.
    let scroll = placed
        .iter()
        .map(|&(_, _, top, _)| top)
        .filter(|&top| top >= scroll)
        .min()
        .unwrap_or(scroll);

    let column_x = |column: u16| {
        area.x + (u32::from(area.width) * u32::from(column) / u32::from(GRID_COLUMNS)) as u16
    };
    placed
        .into_iter()
        .map(|(column, span, top, height)| {
            if top < scroll || top + height > scroll + u32::from(area.height) {
                return None;
            }
            let x = column_x(column);
            let right = column_x(column + span);
            Some(Rect::new(
                x,
                area.y + (top - scroll) as u16,
                right - x,
                height as u16,
            ))
        })
        .collect()
}

/// Index of the card containing the cell, if any.
pub fn card_at(areas: &[Option<Rect>], column: u16, row: u16) -> Option<usize> {
    areas.iter().position(|area| {
        area.is_some_and(|a| {
            column >= a.x && column < a.x + a.width && row >= a.y && row < a.y + a.height
        })
    })
}

/// A rectangle of the given percentage size centered in `area`.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = area.width * percent_x.min(100) / 100;
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
