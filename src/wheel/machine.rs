use std::time::Duration;

use tracing::{debug, info, warn};

use super::resolver::{self, IndexPicker};
use super::{AnimationRequest, Animator, Burst, Celebration, Completion, Cue, PrizeList};
use crate::animation::Easing;
use crate::error::{WheelError, WheelResult};

/// Timing and landing parameters for spins and resets
#[derive(Debug, Clone, PartialEq)]
pub struct SpinSettings {
    pub pointer_angle: f64,
    /// Minimum full revolutions per spin
    pub spins: u32,
    pub spin_duration: Duration,
    pub spin_easing: Easing,
    pub reset_duration: Duration,
    pub reset_easing: Easing,
    /// Confetti emitted on reveal (`None` = no burst)
    pub burst: Option<Burst>,
    /// Play the spin cue when a spin starts
    pub spin_cue: bool,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            pointer_angle: resolver::DEFAULT_POINTER_ANGLE,
            spins: 15,
            spin_duration: Duration::from_secs(10),
            spin_easing: Easing::InOut(4),
            reset_duration: Duration::from_secs(1),
            reset_easing: Easing::InOut(2),
            burst: Some(Burst::default()),
            spin_cue: false,
        }
    }
}

impl SpinSettings {
    pub fn validate(self) -> WheelResult<Self> {
        resolver::validate_spins(self.spins)?;
        resolver::validate_angle(self.pointer_angle)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinState {
    Idle,
    Spinning {
        ticket: u64,
        index: usize,
        target: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinOutcome {
    Started { index: usize, target: f64 },
    /// A spin was already in flight
    Ignored,
}

/// The interactive wheel: one spin at a time, prize revealed when the
/// animator reports the spin finished.
#[derive(Debug)]
pub struct PrizeWheel<A, C> {
    prizes: PrizeList,
    settings: SpinSettings,
    picker: IndexPicker,
    state: SpinState,
    selected: Option<usize>,
    /// Logical rotation, the value the last request will settle on
    rotation: f64,
    next_ticket: u64,
    spins_completed: u64,
    animator: A,
    celebration: C,
}

impl<A: Animator, C: Celebration> PrizeWheel<A, C> {
    pub fn new(
        prizes: PrizeList,
        settings: SpinSettings,
        picker: IndexPicker,
        animator: A,
        celebration: C,
    ) -> WheelResult<Self> {
        let settings = settings.validate()?;
        if let IndexPicker::Fixed(index) = picker {
            if index >= prizes.len() {
                return Err(WheelError::IndexOutOfRange {
                    index,
                    len: prizes.len(),
                });
            }
        }

        Ok(Self {
            prizes,
            settings,
            picker,
            state: SpinState::Idle,
            selected: None,
            rotation: 0.0,
            next_ticket: 1,
            spins_completed: 0,
            animator,
            celebration,
        })
    }

    /// Start a spin if none is in flight
    pub fn spin(&mut self) -> SpinOutcome {
        if self.is_spinning() {
            debug!("spin ignored: wheel already in motion");
            return SpinOutcome::Ignored;
        }

        self.selected = None;

        let count = self.prizes.len();
        let index = self.picker.pick(count);
        let landing = resolver::resolve_target(
            count,
            self.settings.pointer_angle,
            index,
            self.settings.spins,
        );
        let target = resolver::whole_turns(self.rotation) + landing;

        let ticket = self.next_ticket;
        self.next_ticket += 1;

        self.animator.animate(AnimationRequest {
            target,
            duration: self.settings.spin_duration,
            easing: self.settings.spin_easing,
            on_complete: Some(Completion::Spin { ticket }),
        });
        self.rotation = target;
        self.state = SpinState::Spinning {
            ticket,
            index,
            target,
        };

        if self.settings.spin_cue {
            if let Err(e) = self.celebration.play(Cue::Spin) {
                debug!("spin cue skipped: {}", e);
            }
        }

        info!(ticket, index, target, "spin started");
        SpinOutcome::Started { index, target }
    }

    /// Handle a completion token from the animator. Returns the revealed
    /// prize, or `None` for a token that does not match the spin in flight.
    pub fn complete(&mut self, completion: Completion) -> Option<&str> {
        let Completion::Spin { ticket } = completion;
        let index = match self.state {
            SpinState::Spinning {
                ticket: current,
                index,
                ..
            } if current == ticket => index,
            _ => {
                warn!(ticket, "ignoring completion for a spin that is not in flight");
                return None;
            }
        };

        self.state = SpinState::Idle;
        self.selected = Some(index);
        self.spins_completed += 1;

        if let Err(e) = self.celebration.play(Cue::Win) {
            debug!("win cue skipped: {}", e);
        }
        if let Some(burst) = self.settings.burst {
            if let Err(e) = self.celebration.burst(&burst) {
                debug!("confetti skipped: {}", e);
            }
        }

        let prize = self.prizes.get(index);
        info!(ticket, index, prize, "spin finished");
        prize
    }

    /// Rewind the wheel to 0° and clear the prize. No-op while spinning.
    pub fn reset(&mut self) -> bool {
        if self.is_spinning() {
            debug!("reset ignored: wheel already in motion");
            return false;
        }

        self.animator.animate(AnimationRequest {
            target: 0.0,
            duration: self.settings.reset_duration,
            easing: self.settings.reset_easing,
            on_complete: None,
        });
        self.rotation = 0.0;
        self.selected = None;
        info!("wheel reset");
        true
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.state, SpinState::Spinning { .. })
    }

    /// Target of the spin in flight
    pub fn pending_target(&self) -> Option<f64> {
        match self.state {
            SpinState::Spinning { target, .. } => Some(target),
            SpinState::Idle => None,
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        if self.is_spinning() {
            return None;
        }
        self.selected
    }

    pub fn selected_prize(&self) -> Option<&str> {
        self.selected_index().and_then(|i| self.prizes.get(i))
    }

    /// Rotation the wheel settles on once the current animation ends
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rotation currently on screen
    pub fn display_rotation(&self) -> f64 {
        self.animator.rotation()
    }

    /// Segment currently passing under the pointer
    pub fn segment_under_pointer(&self) -> usize {
        resolver::segment_at_pointer(
            self.prizes.len(),
            self.settings.pointer_angle,
            self.display_rotation(),
        )
    }

    pub fn spins_completed(&self) -> u64 {
        self.spins_completed
    }

    pub fn prizes(&self) -> &PrizeList {
        &self.prizes
    }

    pub fn settings(&self) -> &SpinSettings {
        &self.settings
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    pub fn celebration(&self) -> &C {
        &self.celebration
    }

    pub fn celebration_mut(&mut self) -> &mut C {
        &mut self.celebration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::{EffectError, NoCelebration};

    /// Records requests; completion is delivered by the test
    #[derive(Debug, Default)]
    struct RecordingAnimator {
        requests: Vec<AnimationRequest>,
    }

    impl RecordingAnimator {
        fn pending_completion(&self) -> Option<Completion> {
            self.requests.last().and_then(|r| r.on_complete)
        }
    }

    impl Animator for RecordingAnimator {
        fn animate(&mut self, request: AnimationRequest) {
            self.requests.push(request);
        }

        fn rotation(&self) -> f64 {
            self.requests.last().map(|r| r.target).unwrap_or(0.0)
        }
    }

    #[derive(Debug, Default)]
    struct RecordingCelebration {
        cues: Vec<Cue>,
        bursts: Vec<Burst>,
        fail: bool,
    }

    impl Celebration for RecordingCelebration {
        fn play(&mut self, cue: Cue) -> Result<(), EffectError> {
            self.cues.push(cue);
            if self.fail {
                return Err(EffectError::Audio("no audio device".into()));
            }
            Ok(())
        }

        fn burst(&mut self, burst: &Burst) -> Result<(), EffectError> {
            self.bursts.push(*burst);
            if self.fail {
                return Err(EffectError::Confetti("no canvas".into()));
            }
            Ok(())
        }
    }

    const NAMES: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];

    fn prizes() -> PrizeList {
        PrizeList::new(NAMES).unwrap()
    }

    fn wheel_with(
        picker: IndexPicker,
        spins: u32,
    ) -> PrizeWheel<RecordingAnimator, RecordingCelebration> {
        let settings = SpinSettings {
            spins,
            ..SpinSettings::default()
        };
        PrizeWheel::new(
            prizes(),
            settings,
            picker,
            RecordingAnimator::default(),
            RecordingCelebration::default(),
        )
        .unwrap()
    }

    #[test]
    fn spin_then_complete_reveals_prize_once() {
        let mut wheel = wheel_with(IndexPicker::Fixed(0), 15);

        let outcome = wheel.spin();
        assert_eq!(
            outcome,
            SpinOutcome::Started {
                index: 0,
                target: 5647.5
            }
        );
        assert!(wheel.is_spinning());
        assert_eq!(wheel.selected_prize(), None);

        let request = &wheel.animator().requests[0];
        assert_eq!(request.target, 5647.5);
        assert_eq!(request.duration, Duration::from_secs(10));
        assert_eq!(request.easing, Easing::InOut(4));

        let token = wheel.animator().pending_completion().unwrap();
        assert_eq!(wheel.complete(token), Some("A"));
        assert!(!wheel.is_spinning());
        assert_eq!(wheel.selected_prize(), Some("A"));
        assert_eq!(wheel.celebration().cues, vec![Cue::Win]);
        assert_eq!(wheel.celebration().bursts, vec![Burst::default()]);

        // duplicate completion is ignored
        assert_eq!(wheel.complete(token), None);
        assert_eq!(wheel.celebration().cues.len(), 1);
        assert_eq!(wheel.spins_completed(), 1);
    }

    #[test]
    fn fifth_prize_lands_at_reference_angle() {
        let mut wheel = wheel_with(IndexPicker::Fixed(4), 6);
        assert_eq!(
            wheel.spin(),
            SpinOutcome::Started {
                index: 4,
                target: 2227.5
            }
        );
        assert_eq!(wheel.segment_under_pointer(), 4);
    }

    #[test]
    fn spin_while_spinning_is_a_no_op() {
        let mut wheel = wheel_with(IndexPicker::seeded(3), 6);
        wheel.spin();
        let state = wheel.state();
        let target = wheel.pending_target();

        assert_eq!(wheel.spin(), SpinOutcome::Ignored);
        assert_eq!(wheel.state(), state);
        assert_eq!(wheel.pending_target(), target);
        assert_eq!(wheel.selected_prize(), None);
        assert_eq!(wheel.animator().requests.len(), 1);
    }

    #[test]
    fn reset_while_spinning_is_a_no_op() {
        let mut wheel = wheel_with(IndexPicker::Fixed(2), 6);
        wheel.spin();
        assert!(!wheel.reset());
        assert!(wheel.is_spinning());
        assert_eq!(wheel.animator().requests.len(), 1);
    }

    #[test]
    fn reset_twice_is_idempotent() {
        let mut wheel = wheel_with(IndexPicker::Fixed(1), 6);
        wheel.spin();
        let token = wheel.animator().pending_completion().unwrap();
        wheel.complete(token);
        assert_eq!(wheel.selected_prize(), Some("B"));

        for _ in 0..2 {
            assert!(wheel.reset());
            assert_eq!(wheel.selected_prize(), None);
            assert_eq!(wheel.rotation(), 0.0);
            let last = wheel.animator().requests.last().unwrap();
            assert_eq!(last.target, 0.0);
            assert_eq!(last.duration, Duration::from_secs(1));
            assert_eq!(last.easing, Easing::InOut(2));
            assert_eq!(last.on_complete, None);
        }
    }

    #[test]
    fn consecutive_spins_keep_turning_forward() {
        let mut wheel = wheel_with(IndexPicker::seeded(11), 6);
        let mut last = wheel.rotation();
        for _ in 0..20 {
            let SpinOutcome::Started { index, target } = wheel.spin() else {
                panic!("spin should start from idle");
            };
            assert!(target > last, "{target} <= {last}");
            assert!(target - last >= 6.0 * 360.0 - 360.0);
            assert_eq!(
                resolver::segment_at_pointer(8, 270.0, target),
                index,
                "target {target} does not land on {index}"
            );
            let token = wheel.animator().pending_completion().unwrap();
            assert_eq!(wheel.complete(token), Some(NAMES[index]));
            last = target;
        }
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut wheel = wheel_with(IndexPicker::Fixed(0), 6);
        wheel.spin();
        assert_eq!(wheel.complete(Completion::Spin { ticket: 999 }), None);
        assert!(wheel.is_spinning());
    }

    #[test]
    fn completion_while_idle_is_ignored() {
        let mut wheel = wheel_with(IndexPicker::Fixed(0), 6);
        assert_eq!(wheel.complete(Completion::Spin { ticket: 1 }), None);
        assert_eq!(wheel.selected_prize(), None);
    }

    #[test]
    fn failing_effects_do_not_block_the_reveal() {
        let settings = SpinSettings {
            spins: 6,
            spin_cue: true,
            ..SpinSettings::default()
        };
        let celebration = RecordingCelebration {
            fail: true,
            ..RecordingCelebration::default()
        };
        let mut wheel = PrizeWheel::new(
            prizes(),
            settings,
            IndexPicker::Fixed(7),
            RecordingAnimator::default(),
            celebration,
        )
        .unwrap();

        wheel.spin();
        let token = wheel.animator().pending_completion().unwrap();
        assert_eq!(wheel.complete(token), Some("H"));
        assert_eq!(wheel.celebration().cues, vec![Cue::Spin, Cue::Win]);
        assert_eq!(wheel.celebration().bursts.len(), 1);
    }

    #[test]
    fn disabled_burst_is_skipped() {
        let settings = SpinSettings {
            burst: None,
            ..SpinSettings::default()
        };
        let mut wheel = PrizeWheel::new(
            prizes(),
            settings,
            IndexPicker::Fixed(0),
            RecordingAnimator::default(),
            RecordingCelebration::default(),
        )
        .unwrap();
        wheel.spin();
        let token = wheel.animator().pending_completion().unwrap();
        wheel.complete(token);
        assert!(wheel.celebration().bursts.is_empty());
    }

    #[test]
    fn construction_validates_preconditions() {
        let bad_spins = SpinSettings {
            spins: 0,
            ..SpinSettings::default()
        };
        assert!(matches!(
            PrizeWheel::new(
                prizes(),
                bad_spins,
                IndexPicker::Fixed(0),
                RecordingAnimator::default(),
                NoCelebration
            ),
            Err(WheelError::InvalidSpinCount)
        ));

        assert!(matches!(
            PrizeWheel::new(
                prizes(),
                SpinSettings::default(),
                IndexPicker::Fixed(8),
                RecordingAnimator::default(),
                NoCelebration
            ),
            Err(WheelError::IndexOutOfRange { index: 8, len: 8 })
        ));
    }
}
