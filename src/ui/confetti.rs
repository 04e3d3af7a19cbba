use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Frame;

use crate::celebration::Particle;

/// Cell a particle occupies inside `area`, if it is on screen
pub fn particle_cell(particle: &Particle, area: Rect) -> Option<(u16, u16)> {
    if !(0.0..1.0).contains(&particle.x) || !(0.0..1.0).contains(&particle.y) {
        return None;
    }
    let x = area.x + (particle.x * area.width as f64) as u16;
    let y = area.y + (particle.y * area.height as f64) as u16;
    (x < area.right() && y < area.bottom()).then_some((x, y))
}

/// Paint particles straight into the frame buffer, over everything else
pub fn render(frame: &mut Frame, particles: &[Particle], area: Rect) {
    paint(frame.buffer_mut(), particles, area);
}

fn paint(buf: &mut Buffer, particles: &[Particle], area: Rect) {
    for p in particles {
        if let Some(pos) = particle_cell(p, area) {
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_char(p.glyph).set_fg(p.color);
            }
        }
    }
}
