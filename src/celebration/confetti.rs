use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::style::Color;

use crate::wheel::Burst;

/// Glyphs a confetti particle may be drawn with
const CONFETTI_GLYPHS: &[char] = &['*', '✦', '✧', '◆', '◇', '●', '■', '▲', '▼', '•'];

/// Downward acceleration in viewport heights per second²
const GRAVITY: f64 = 1.4;
/// Fraction of velocity kept after one second of drag
const DRAG_PER_SECOND: f64 = 0.35;
/// Upper bound on live particles, older ones are dropped first
const MAX_PARTICLES: usize = 600;

/// A single confetti piece. Position is a fraction of the viewport
/// (0,0 = top-left, 1,1 = bottom-right).
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub glyph: char,
    pub color: Color,
    pub ttl: f64,
}

impl Particle {
    fn is_visible(&self) -> bool {
        self.ttl > 0.0 && self.y <= 1.05 && (-0.05..=1.05).contains(&self.x)
    }
}

/// Particle field fed by bursts and stepped by the render tick
#[derive(Debug, Clone)]
pub struct ConfettiField {
    particles: Vec<Particle>,
    palette: Vec<Color>,
    rng: StdRng,
}

impl ConfettiField {
    pub fn new(palette: Vec<Color>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let palette = if palette.is_empty() {
            vec![Color::Yellow, Color::Magenta, Color::Cyan, Color::Green]
        } else {
            palette
        };
        Self {
            particles: Vec::new(),
            palette,
            rng,
        }
    }

    /// Launch `burst.particle_count` particles (capped at `MAX_PARTICLES`) from
    /// the burst origin in a cone of `burst.spread` degrees centered on straight up.
    pub fn emit(&mut self, burst: &Burst) {
        let (ox, oy) = burst.origin;
        let half = burst.spread.abs().min(360.0) / 2.0;

        let count = (burst.particle_count as usize).min(MAX_PARTICLES);
        for _ in 0..count {
            let angle = (90.0 + self.rng.gen_range(-half..=half)).to_radians();
            let speed = self.rng.gen_range(0.5..1.4);
            let glyph = CONFETTI_GLYPHS[self.rng.gen_range(0..CONFETTI_GLYPHS.len())];
            let color = self.palette[self.rng.gen_range(0..self.palette.len())];
            self.particles.push(Particle {
                x: ox,
                y: oy,
                // terminal cells are tall, so horizontal travel is damped
                vx: speed * angle.cos() * 0.6,
                vy: -speed * angle.sin(),
                glyph,
                color,
                ttl: self.rng.gen_range(2.0..4.0),
            });
        }

        if self.particles.len() > MAX_PARTICLES {
            let excess = self.particles.len() - MAX_PARTICLES;
            self.particles.drain(..excess);
        }
    }

    /// Advance physics by `dt` and drop particles that expired or left the view
    pub fn tick(&mut self, dt: Duration) {
        let dt = dt.as_secs_f64();
        if dt <= 0.0 {
            return;
        }
        let drag = DRAG_PER_SECOND.powf(dt);

        self.particles.retain_mut(|p| {
            p.vy += GRAVITY * dt;
            p.vx *= drag;
            p.vy *= drag;
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            p.ttl -= dt;
            p.is_visible()
        });
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> ConfettiField {
        ConfettiField::new(vec![Color::Red, Color::Blue], Some(7))
    }

    #[test]
    fn burst_emits_requested_count_at_origin() {
        let mut confetti = field();
        confetti.emit(&Burst::default());
        assert_eq!(confetti.particles().len(), 200);
        assert!(confetti
            .particles()
            .iter()
            .all(|p| p.x == 0.5 && p.y == 0.6 && p.vy < 0.0));
        assert!(confetti
            .particles()
            .iter()
            .all(|p| p.color == Color::Red || p.color == Color::Blue));
    }

    #[test]
    fn spread_limits_launch_direction() {
        let mut confetti = field();
        confetti.emit(&Burst {
            particle_count: 100,
            spread: 90.0,
            origin: (0.5, 0.5),
        });
        // within 45° of vertical: |vx| / 0.6 <= |vy|
        for p in confetti.particles() {
            assert!(p.vx.abs() / 0.6 <= p.vy.abs() + 1e-9);
        }
    }

    #[test]
    fn particles_fall_and_expire() {
        let mut confetti = field();
        confetti.emit(&Burst::default());
        assert!(confetti.is_active());

        for _ in 0..200 {
            confetti.tick(Duration::from_millis(33));
        }
        assert!(!confetti.is_active());
    }

    #[test]
    fn live_particles_are_capped() {
        let mut confetti = field();
        for _ in 0..5 {
            confetti.emit(&Burst::default());
        }
        assert_eq!(confetti.particles().len(), MAX_PARTICLES);
        confetti.clear();
        assert!(!confetti.is_active());
    }

    #[test]
    fn oversized_burst_is_clamped_before_emitting() {
        let mut confetti = field();
        confetti.emit(&Burst {
            particle_count: u32::MAX,
            ..Burst::default()
        });
        assert_eq!(confetti.particles().len(), MAX_PARTICLES);
    }

    #[test]
    fn empty_palette_falls_back_to_defaults() {
        let mut confetti = ConfettiField::new(Vec::new(), Some(1));
        confetti.emit(&Burst {
            particle_count: 3,
            ..Burst::default()
        });
        assert_eq!(confetti.particles().len(), 3);
    }
}
