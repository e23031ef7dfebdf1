//! Dashboard footer component
//!
//! Renders key bindings for the current interaction mode

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render footer.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let (footer_text, footer_color) = if state.modal_error.is_some() {
        ("[E] Dismiss | [Q] Quit", Color::LightRed)
    } else if state.drag.is_dragging() {
        (
            "DRAGGING | [Arrows] Move | [Space] Drop | [Esc] Cancel",
            Color::Yellow,
        )
    } else {
        (
            "[Arrows] Focus | [Space] Move | [A]dd [X] Remove [S]ize [T]ype [R]eset | [ ] Window | +/- Zoom | [H]/[L] Pan | [0] Unzoom | [I] Analyze | [Q] Quit",
            Color::Cyan,
        )
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(footer_color)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
