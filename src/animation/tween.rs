use std::time::Duration;

use tracing::trace;

use super::{lerp, Easing};
use crate::wheel::{AnimationRequest, Animator, Completion};

/// A single in-flight rotation tween
#[derive(Debug, Clone)]
struct Tween {
    from: f64,
    to: f64,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
    on_complete: Option<Completion>,
}

impl Tween {
    fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

/// Tick-driven animator for the wheel rotation.
///
/// The host calls [`TweenAnimator::advance`] once per frame with the time
/// elapsed since the previous frame. A new request replaces the running
/// tween and starts from the rotation currently on screen.
#[derive(Debug, Clone, Default)]
pub struct TweenAnimator {
    rotation: f64,
    active: Option<Tween>,
}

impl TweenAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Target of the running tween, if any
    pub fn target(&self) -> Option<f64> {
        self.active.as_ref().map(|t| t.to)
    }

    /// Move the running tween forward by `dt`. Returns the completion token
    /// of a tween that reached its target during this step.
    pub fn advance(&mut self, dt: Duration) -> Option<Completion> {
        let tween = self.active.as_mut()?;
        tween.elapsed = tween.elapsed.saturating_add(dt);

        let t = tween.progress();
        self.rotation = lerp(tween.from, tween.to, tween.easing.apply(t));

        if t >= 1.0 {
            self.rotation = tween.to;
            let finished = self.active.take()?;
            trace!("tween finished at {:.2}°", finished.to);
            return finished.on_complete;
        }
        None
    }
}

impl Animator for TweenAnimator {
    fn animate(&mut self, request: AnimationRequest) {
        trace!(
            "tween {:.2}° -> {:.2}° over {:?} ({})",
            self.rotation,
            request.target,
            request.duration,
            request.easing
        );
        self.active = Some(Tween {
            from: self.rotation,
            to: request.target,
            elapsed: Duration::ZERO,
            duration: request.duration,
            easing: request.easing,
            on_complete: request.on_complete,
        });
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }
}
