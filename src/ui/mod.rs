pub mod confetti;
pub mod header;
pub mod help;
pub mod panel;
pub mod status_bar;
pub mod theme;
pub mod wheel;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::wheel::Viewport;
use theme::Theme;

/// Width of the control panel next to the wheel
const PANEL_WIDTH: u16 = 44;

/// Screen regions for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub header: Rect,
    pub wheel: Rect,
    pub panel: Rect,
    pub status: Rect,
}

pub fn split(area: Rect) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title + subtitle
            Constraint::Min(0),    // Wheel + panel
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let panel_width = PANEL_WIDTH.min(rows[1].width / 2);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(panel_width)])
        .split(rows[1]);

    Areas {
        header: rows[0],
        wheel: body[0],
        panel: body[1],
        status: rows[2],
    }
}

/// Canvas area of the wheel for a terminal of size `area`, in canvas units
/// (one unit per column, two per row, so units are roughly square).
pub fn wheel_viewport(area: Rect) -> Viewport {
    let inner = wheel::block(&Theme::default()).inner(split(area).wheel);
    Viewport::new(inner.width as f64, inner.height as f64 * 2.0)
}

/// Top-level draw function
pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    app.resize(wheel_viewport(area));

    let areas = split(area);
    header::render(f, app, areas.header);
    wheel::render(f, app, areas.wheel);
    panel::render(f, app, areas.panel);
    status_bar::render(f, app, areas.status);

    confetti::render(f, app.wheel.celebration().particles(), area);

    if app.show_help {
        help::render(f, app, area);
    }

    if let Some(ref msg) = app.toast_message {
        render_toast(f, msg, app.toast_is_error, &app.theme);
    }
}

/// Render a temporary toast notification at the top-right
fn render_toast(f: &mut Frame, message: &str, is_error: bool, theme: &Theme) {
    let area = f.area();
    if area.width < 8 || area.height < 4 {
        return;
    }
    let width = (message.width() as u16 + 6).min(area.width - 4);
    let x = area.width.saturating_sub(width + 2);
    let toast_area = Rect::new(x, 1, width, 3);

    f.render_widget(Clear, toast_area);

    let style = theme.style_toast(is_error);
    let icon = if is_error {
        theme::ICON_ERROR
    } else {
        theme::ICON_SUCCESS
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(style);

    let text = Paragraph::new(Line::from(vec![
        Span::styled(icon, style.add_modifier(Modifier::BOLD)),
        Span::styled(message, theme.style_default()),
    ]))
    .block(block);

    f.render_widget(text, toast_area);
}

/// Fixed-size rectangle centered in `area`
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_reserves_header_panel_and_status() {
        let areas = split(Rect::new(0, 0, 120, 40));
        assert_eq!(areas.header.height, 3);
        assert_eq!(areas.status.height, 1);
        assert_eq!(areas.status.y, 39);
        assert_eq!(areas.panel.width, PANEL_WIDTH);
        assert_eq!(areas.wheel.width + areas.panel.width, 120);
    }

    #[test]
    fn viewport_counts_rows_twice() {
        let viewport = wheel_viewport(Rect::new(0, 0, 120, 40));
        // 76x36 body, minus the border
        assert_eq!(viewport.width, 74.0);
        assert_eq!(viewport.height, 68.0);
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let viewport = wheel_viewport(Rect::new(0, 0, 3, 2));
        assert!(viewport.width <= 1.0);
        assert_eq!(viewport.height, 0.0);
        assert_eq!(centered_rect_fixed(10, 10, Rect::new(0, 0, 4, 4)), Rect::new(0, 0, 4, 4));
    }
}
