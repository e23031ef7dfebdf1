//! Widget grid component
//!
//! Draws each card's chart scene on a braille canvas.

use super::super::state::DashboardState;
use crate::chart::{Axis, Scene, Shape};
use crate::widgets::{Widget, WidgetChart};

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Rectangle};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Canvas-pixel spacing of the strokes that fill a bar.
const BAR_FILL_STEP: f64 = 2.0;

pub fn render_widget_grid(f: &mut Frame, area: Rect, state: &DashboardState) {
    if state.widgets.is_empty() {
        let empty = Paragraph::new("No widgets. Press [A] to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            );
        f.render_widget(empty, area);
        return;
    }

    let source = state.drag.active_source();
    let target = state.drag.drop_target();
    for (index, (widget, card)) in state
        .widgets
        .iter()
        .zip(state.card_areas())
        .enumerate()
    {
        let Some(card) = card else {
            continue;
        };
        let border = if source == Some(index) {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if target == Some(index) {
            Style::default().fg(Color::LightGreen)
        } else if state.focus == index {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let border_type = if state.focus == index {
            BorderType::Thick
        } else {
            BorderType::Rounded
        };
        render_card(
            f,
            card,
            widget,
            state.charts.get(&widget.id),
            border,
            border_type,
        );
    }
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    widget: &Widget,
    chart: Option<&WidgetChart>,
    border: Style,
    border_type: BorderType,
) {
    let color = widget
        .rgb()
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::LightBlue);

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(
                format!(" {} ", widget.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("[{}] ", widget.size.badge()),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let subtitle = widget.subtitle.clone().unwrap_or_default();
    f.render_widget(
        Paragraph::new(subtitle).style(Style::default().fg(Color::Gray)),
        chunks[0],
    );

    let Some(chart) = chart else {
        return;
    };
    let scene = chart.render();
    if scene.is_empty() {
        f.render_widget(
            Paragraph::new("No data").style(Style::default().fg(Color::DarkGray)),
            chunks[1],
        );
    } else {
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, scene.width])
            .y_bounds([0.0, scene.height])
            .paint(|ctx| paint_scene(ctx, &scene, color));
        f.render_widget(canvas, chunks[1]);
    }

    let axes = match (&widget.x_axis, &widget.y_axis) {
        (Some(x), Some(y)) => format!("{} / {}  ", x, y),
        _ => String::new(),
    };
    f.render_widget(
        Paragraph::new(format!("{}{}", axes, chart.viewport_label()))
            .style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

/// Scene y grows downwards; the canvas y grows upwards.
fn paint_scene(ctx: &mut Context, scene: &Scene, color: Color) {
    let flip = |y: f64| scene.height - y;

    for shape in &scene.shapes {
        match shape {
            Shape::Bar {
                x,
                y,
                width,
                height,
                ..
            } => {
                let bottom = flip(y + height);
                ctx.draw(&Rectangle {
                    x: *x,
                    y: bottom,
                    width: *width,
                    height: *height,
                    color,
                });
                let mut stroke = *x;
                while stroke < x + width {
                    ctx.draw(&CanvasLine {
                        x1: stroke,
                        y1: bottom,
                        x2: stroke,
                        y2: bottom + height,
                        color,
                    });
                    stroke += BAR_FILL_STEP;
                }
            }
            Shape::Path { points } => {
                for pair in points.windows(2) {
                    let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
                    ctx.draw(&CanvasLine {
                        x1,
                        y1: flip(y1),
                        x2,
                        y2: flip(y2),
                        color,
                    });
                }
            }
            Shape::Marker { x, y, radius } => {
                ctx.draw(&Circle {
                    x: *x,
                    y: flip(*y),
                    radius: *radius,
                    color: Color::White,
                });
            }
            Shape::Tick {
                axis: Axis::X,
                position,
                label,
            } => {
                ctx.print(
                    *position,
                    0.0,
                    Span::styled(label.clone(), Style::default().fg(Color::DarkGray)),
                );
            }
            Shape::Tick {
                axis: Axis::Y,
                position,
                label,
            } => {
                ctx.print(
                    0.0,
                    flip(*position),
                    Span::styled(label.clone(), Style::default().fg(Color::DarkGray)),
                );
            }
        }
    }
}
