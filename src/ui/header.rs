use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;

/// Title bar: wheel title and subtitle, centered
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_type(t.border_type)
        .border_style(t.style_border())
        .style(t.style_default());

    let lines = vec![
        Line::from(Span::styled(app.labels.title.as_str(), t.style_accent_bold())),
        Line::from(Span::styled(app.labels.subtitle.as_str(), t.style_dim())),
    ];

    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(para, area);
}
