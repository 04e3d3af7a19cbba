use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::{key_label, App};

/// Keybinding entries: (key, description)
fn keybindings(app: &App) -> Vec<(String, &'static str)> {
    vec![
        (
            format!("{} / Enter", key_label(app.keys.spin)),
            "Spin the wheel",
        ),
        (key_label(app.keys.reset), "Reset the wheel to 0°"),
        (key_label(app.keys.help), "Toggle this help"),
        (format!("{} / Esc", key_label(app.keys.quit)), "Quit"),
        ("Ctrl+C".to_string(), "Quit"),
    ]
}

/// Render the help overlay
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let bindings = keybindings(app);
    let width = 48_u16.min(area.width.saturating_sub(4));
    let height = (bindings.len() as u16 + 6).min(area.height.saturating_sub(2));

    let dialog = super::centered_rect_fixed(width, height, area);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(Line::from(vec![Span::styled(
            " Keybindings ",
            t.style_accent_bold(),
        )]))
        .borders(Borders::ALL)
        .border_type(t.border_type)
        .border_style(t.style_accent())
        .style(t.style_default());

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));

    for (key, desc) in bindings {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<14}", key), t.style_key_hint()),
            Span::styled(desc, t.style_default()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Press ", t.style_dim()),
        Span::styled(key_label(app.keys.help), t.style_key_hint()),
        Span::styled(" or ", t.style_dim()),
        Span::styled("Esc", t.style_key_hint()),
        Span::styled(" to close", t.style_dim()),
    ]));

    let para = Paragraph::new(lines).block(block);
    frame.render_widget(para, dialog);
}
