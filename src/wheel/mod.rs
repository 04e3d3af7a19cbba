//! The prize wheel core: segment geometry, spin resolution and the
//! spin/reset state machine. Nothing in here touches the terminal; time,
//! rendering, sound and confetti reach the machine through the
//! [`Animator`] and [`Celebration`] traits.

pub mod layout;
pub mod machine;
pub mod prize;
pub mod resolver;

use std::time::Duration;

use thiserror::Error;

use crate::animation::Easing;

pub use layout::{LayoutParams, Viewport, WheelLayout};
pub use machine::{PrizeWheel, SpinOutcome, SpinSettings, SpinState};
pub use prize::PrizeList;
pub use resolver::IndexPicker;

/// Token handed back by the animator when a tween that asked for it finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Spin { ticket: u64 },
}

/// Rotation tween requested by the state machine
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRequest {
    /// Absolute rotation in degrees
    pub target: f64,
    pub duration: Duration,
    pub easing: Easing,
    pub on_complete: Option<Completion>,
}

/// Drives the wheel's rotation over time.
///
/// Implementations must hand back `on_complete` exactly once, after the
/// rotation has reached `target`, on the thread that owns the wheel.
pub trait Animator {
    fn animate(&mut self, request: AnimationRequest);

    /// Rotation currently on screen
    fn rotation(&self) -> f64;
}

/// Audio events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Spin,
    Win,
}

/// One-shot confetti emission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub particle_count: u32,
    /// Cone width in degrees around straight up
    pub spread: f64,
    /// Emission point as fractions of the viewport (0,0 = top-left)
    pub origin: (f64, f64),
}

impl Default for Burst {
    fn default() -> Self {
        Self {
            particle_count: 200,
            spread: 90.0,
            origin: (0.5, 0.6),
        }
    }
}

#[derive(Error, Debug)]
pub enum EffectError {
    #[error("audio playback failed: {0}")]
    Audio(String),

    #[error("confetti unavailable: {0}")]
    Confetti(String),
}

/// Fire-and-forget celebratory side effects. Failures are reported back
/// but never stop the wheel from revealing a prize.
pub trait Celebration {
    fn play(&mut self, cue: Cue) -> Result<(), EffectError>;

    fn burst(&mut self, burst: &Burst) -> Result<(), EffectError>;
}

/// Celebration that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCelebration;

impl Celebration for NoCelebration {
    fn play(&mut self, _cue: Cue) -> Result<(), EffectError> {
        Ok(())
    }

    fn burst(&mut self, _burst: &Burst) -> Result<(), EffectError> {
        Ok(())
    }
}
