use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{key_label, App};

/// Render the bottom status bar with key hints and wheel state
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    // Left: keybindings
    let key_spans: Vec<Span> = hints(app)
        .into_iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(format!(" {} ", key), t.style_key_hint()),
                Span::styled(format!("{} ", desc), t.style_key_desc()),
                Span::styled("│", Style::default().fg(t.border)),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(key_spans)), chunks[0]);

    // Right: wheel state
    let state = if app.wheel.is_spinning() {
        Span::styled(" ● Spinning", t.style_warning())
    } else if app.wheel.animator().is_animating() {
        Span::styled(" ↺ Resetting", t.style_dim())
    } else if app.wheel.selected_prize().is_some() {
        Span::styled(" ● Prize revealed", Style::default().fg(t.success))
    } else {
        Span::styled(" ○ Ready", t.style_dim())
    };
    let status_line = Line::from(vec![
        state,
        Span::raw(" │"),
        Span::styled(
            format!(" spins: {} ", app.wheel.spins_completed()),
            t.style_dim(),
        ),
        Span::styled(
            format!("{:>7.1}° ", app.wheel.display_rotation().rem_euclid(360.0)),
            t.style_dim(),
        ),
    ]);
    let status = Paragraph::new(status_line).alignment(Alignment::Right);
    f.render_widget(status, chunks[1]);
}

fn hints(app: &App) -> Vec<(String, &'static str)> {
    if app.show_help {
        return vec![("Esc".into(), "Close")];
    }
    if app.wheel.is_spinning() {
        return vec![(key_label(app.keys.quit), "Quit")];
    }
    vec![
        (key_label(app.keys.spin), "Spin"),
        (key_label(app.keys.reset), "Reset"),
        (key_label(app.keys.help), "Help"),
        (key_label(app.keys.quit), "Quit"),
    ]
}
