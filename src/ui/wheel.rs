use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use super::theme::Theme;
use crate::animation::spinner;
use crate::app::App;
use crate::wheel::layout::Point;
use crate::wheel::WheelLayout;

/// Braille dot pitch in canvas units (2 dots per column, 4 per row of 2 units)
const SAMPLE_STEP: f64 = 0.5;
/// Hub radius as a fraction of the wheel radius
const HUB_FRACTION: f64 = 0.1;

/// Frame around the wheel canvas
pub fn block(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.style_border())
        .style(theme.style_default())
}

/// Sample the wheel disc on a `step` grid and bucket every sample by the
/// segment it shows once the wheel is turned by `rotation` degrees.
/// Coordinates are in the layout's screen frame (y down).
pub fn sector_points(layout: &WheelLayout, rotation: f64, step: f64) -> Vec<Vec<(f64, f64)>> {
    let mut sectors = vec![Vec::new(); layout.segments().len()];
    let c = layout.center();
    let r = layout.radius();
    if r <= 0.0 || step <= 0.0 {
        return sectors;
    }

    let hub = r * HUB_FRACTION;
    let steps = (2.0 * r / step).ceil() as usize;
    for row in 0..steps {
        let y = c.y - r + (row as f64 + 0.5) * step;
        for col in 0..steps {
            let x = c.x - r + (col as f64 + 0.5) * step;
            let (dx, dy) = (x - c.x, y - c.y);
            let dist = dx.hypot(dy);
            if dist > r || dist < hub {
                continue;
            }
            let on_screen = dy.atan2(dx).to_degrees();
            sectors[layout.segment_at(on_screen - rotation)].push((x, y));
        }
    }
    sectors
}

/// Screen frame (y down) to canvas frame (y up)
fn to_canvas(p: Point, height: f64) -> (f64, f64) {
    (p.x, height - p.y)
}

/// Render the wheel: colored sectors, rim, hub, segment numbers and pointer
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let layout = &app.layout;
    let vp = layout.viewport();

    let title = Line::from(vec![Span::styled(
        format!(" {} prizes ", layout.segments().len()),
        t.style_dim(),
    )]);
    let block = block(t).title(title);

    if vp.width < 4.0 || vp.height < 4.0 {
        frame.render_widget(block, area);
        return;
    }

    let rotation = app.wheel.display_rotation();
    let sectors: Vec<Vec<(f64, f64)>> = sector_points(layout, rotation, SAMPLE_STEP)
        .into_iter()
        .map(|pts| pts.into_iter().map(|(x, y)| (x, vp.height - y)).collect())
        .collect();

    let center = layout.center();
    let radius = layout.radius();
    let (cx, cy) = to_canvas(center, vp.height);
    let winner = app.wheel.selected_index();
    let pointer_angle = app.wheel.settings().pointer_angle;
    let pointer = spinner::pointer_frame(app.pointer_ticks);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, vp.width])
        .y_bounds([0.0, vp.height])
        .paint(|ctx| {
            for (i, coords) in sectors.iter().enumerate() {
                let color = app.colors.get(i).copied().unwrap_or(t.accent);
                ctx.draw(&Points { coords, color });
            }
            ctx.draw(&Circle {
                x: cx,
                y: cy,
                radius,
                color: t.rim,
            });
            ctx.draw(&Circle {
                x: cx,
                y: cy,
                radius: radius * HUB_FRACTION,
                color: t.hub,
            });

            ctx.layer();

            for segment in layout.segments() {
                let anchor = center.polar(layout.label_distance(), segment.center + rotation);
                let (x, y) = to_canvas(anchor, vp.height);
                let number = (segment.index + 1).to_string();
                let mut style = Style::default().fg(t.fg).add_modifier(Modifier::BOLD);
                if winner == Some(segment.index) {
                    style = style.fg(t.accent).add_modifier(Modifier::REVERSED);
                }
                ctx.print(
                    x - number.len() as f64 / 2.0,
                    y,
                    Line::styled(number, style),
                );
            }

            let tip = center.polar(radius + 1.0, pointer_angle);
            let (px, py) = to_canvas(tip, vp.height);
            ctx.print(
                px - 0.5,
                py,
                Line::styled(pointer, Style::default().fg(t.pointer).add_modifier(Modifier::BOLD)),
            );
        });

    frame.render_widget(canvas, area);
}
