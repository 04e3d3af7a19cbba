pub mod audio;
pub mod confetti;

use std::time::Duration;

use crate::wheel::{Burst, Celebration, Cue, EffectError};

pub use audio::{AudioPlayer, AudioSettings};
pub use confetti::{ConfettiField, Particle};

/// Celebration backed by the terminal: confetti drawn over the UI and
/// sounds played through an external player or the bell.
#[derive(Debug, Clone)]
pub struct TerminalCelebration {
    confetti: ConfettiField,
    confetti_enabled: bool,
    audio: AudioPlayer,
}

impl TerminalCelebration {
    pub fn new(confetti: ConfettiField, confetti_enabled: bool, audio: AudioPlayer) -> Self {
        Self {
            confetti,
            confetti_enabled,
            audio,
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.confetti.is_active() {
            self.confetti.tick(dt);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        self.confetti.particles()
    }

    pub fn clear(&mut self) {
        self.confetti.clear();
    }
}

impl Celebration for TerminalCelebration {
    fn play(&mut self, cue: Cue) -> Result<(), EffectError> {
        self.audio.play(cue)
    }

    fn burst(&mut self, burst: &Burst) -> Result<(), EffectError> {
        if !self.confetti_enabled {
            return Err(EffectError::Confetti("disabled".into()));
        }
        self.confetti.emit(burst);
        Ok(())
    }
}
