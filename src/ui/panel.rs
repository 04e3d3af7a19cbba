use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme;
use crate::animation::{pulse, spinner};
use crate::app::{key_label, App};
use crate::wheel::prize::label_lines;

/// Control panel: buttons, prize reveal and legend, top to bottom
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let revealed = app.wheel.selected_prize().is_some();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),                              // Buttons
            Constraint::Length(if revealed { 7 } else { 0 }), // Reveal
            Constraint::Min(0),                                 // Legend
        ])
        .split(area);

    render_buttons(frame, app, chunks[0]);
    if revealed {
        render_reveal(frame, app, chunks[1]);
    }
    render_legend(frame, app, chunks[2]);
}

fn panel_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    let t = &app.theme;
    Block::default()
        .title(Span::styled(format!(" {title} "), t.style_accent_bold()))
        .borders(Borders::ALL)
        .border_type(t.border_type)
        .border_style(t.style_border())
        .style(t.style_default())
}

fn render_buttons(frame: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let spinning = app.wheel.is_spinning();
    let enabled = !spinning;

    let spin_line = if spinning {
        Line::from(vec![
            Span::styled(
                format!(" {} ", spinner::spinner_frame(app.tick_count)),
                t.style_accent(),
            ),
            Span::styled(app.labels.spinning_label.as_str(), t.style_button(false)),
        ])
    } else {
        Line::from(vec![
            Span::styled(format!(" {} ", key_label(app.keys.spin)), t.style_key_hint()),
            Span::styled(app.labels.spin_label.as_str(), t.style_button(enabled)),
        ])
    };

    let reset_line = Line::from(vec![
        Span::styled(
            format!(" {} ", key_label(app.keys.reset)),
            if enabled { t.style_key_hint() } else { t.style_dim() },
        ),
        Span::styled(app.labels.reset_label.as_str(), t.style_button(enabled)),
    ]);

    let para = Paragraph::new(vec![spin_line, reset_line]).block(panel_block(app, "Controls"));
    frame.render_widget(para, area);
}

fn render_reveal(frame: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let (Some(index), Some(prize)) = (app.wheel.selected_index(), app.wheel.selected_prize())
    else {
        return;
    };

    let ticks = app.reveal_ticks.unwrap_or(0);
    let heading_style = t.style_reveal(pulse::is_bright(ticks));
    let color = app.colors.get(index).copied().unwrap_or(t.accent);
    let (first, rest) = label_lines(prize);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", theme::ICON_TROPHY), heading_style),
            Span::styled(app.labels.reveal_heading.as_str(), heading_style),
            Span::styled(format!(" {}", theme::ICON_TROPHY), heading_style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{} ", theme::ICON_SWATCH), t.style_segment(color)),
            Span::styled(first, t.style_default().add_modifier(Modifier::BOLD)),
        ]),
    ];
    if !rest.is_empty() {
        lines.push(Line::from(Span::styled(
            rest,
            t.style_default().add_modifier(Modifier::BOLD),
        )));
    }

    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(panel_block(app, "Prize"));
    frame.render_widget(para, area);
}

fn render_legend(frame: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let spinning = app.wheel.is_spinning();
    let highlighted = if spinning {
        Some(app.wheel.segment_under_pointer())
    } else {
        app.wheel.selected_index()
    };

    // borders + swatch + number column
    let label_width = (area.width as usize).saturating_sub(2 + 2 + 4);

    let items: Vec<ListItem> = app
        .wheel
        .prizes()
        .iter()
        .enumerate()
        .map(|(i, prize)| {
            let color = app.colors.get(i).copied().unwrap_or(t.accent);
            let mut label_style = t.style_default();
            if highlighted == Some(i) {
                label_style = label_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", theme::ICON_SWATCH), t.style_segment(color)),
                Span::styled(format!("{:>2}. ", i + 1), t.style_dim()),
                Span::styled(truncate(prize, label_width), label_style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(panel_block(app, "Prizes")), area);
}

/// Cut `text` to at most `max` display columns, marking the cut with `…`
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_labels_are_untouched() {
        assert_eq!(truncate("Day Pass", 20), "Day Pass");
        assert_eq!(truncate("", 3), "");
    }

    #[test]
    fn long_labels_end_with_ellipsis() {
        let cut = truncate("Evaluación Checkup para tu persona favorita.", 12);
        assert_eq!(cut, "Evaluación …");
        assert_eq!(cut.width(), 12);
    }

    #[test]
    fn wide_characters_count_double() {
        // each CJK char is two columns
        assert_eq!(truncate("大奖大奖大奖", 5), "大奖…");
        assert_eq!(truncate("abc", 0), "");
    }
}
