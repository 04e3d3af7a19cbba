use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{WheelError, WheelResult};

/// Indicator position at the top of the wheel in the y-down rotation frame
pub const DEFAULT_POINTER_ANGLE: f64 = 270.0;

/// Center angle of segment `index` for a wheel of `count` segments
pub fn segment_center(count: usize, index: usize) -> f64 {
    let span = 360.0 / count as f64;
    index as f64 * span + span / 2.0
}

/// Absolute rotation that lands the center of segment `index` under the
/// pointer after `spins` full revolutions. Always in
/// `[spins * 360, spins * 360 + 360)`.
pub fn resolve_target(count: usize, pointer_angle: f64, index: usize, spins: u32) -> f64 {
    let landing = pointer_angle - segment_center(count, index);
    let normalized = ((landing % 360.0) + 360.0) % 360.0;
    f64::from(spins) * 360.0 + normalized
}

/// Segment sitting under the pointer when the wheel is rotated by `rotation`
pub fn segment_at_pointer(count: usize, pointer_angle: f64, rotation: f64) -> usize {
    let span = 360.0 / count as f64;
    let wheel_angle = (pointer_angle - rotation).rem_euclid(360.0);
    ((wheel_angle / span).floor() as usize).min(count - 1)
}

/// Rotation made of the whole revolutions already contained in `rotation`
pub fn whole_turns(rotation: f64) -> f64 {
    (rotation / 360.0).floor() * 360.0
}

pub fn validate_spins(spins: u32) -> WheelResult<u32> {
    if spins == 0 {
        return Err(WheelError::InvalidSpinCount);
    }
    Ok(spins)
}

pub fn validate_angle(degrees: f64) -> WheelResult<f64> {
    if !degrees.is_finite() {
        return Err(WheelError::InvalidAngle(degrees));
    }
    Ok(degrees)
}

/// How the landing segment is chosen for each spin
#[derive(Debug, Clone)]
pub enum IndexPicker {
    /// Uniform draw over all segments
    Random(StdRng),
    /// Always the same segment
    Fixed(usize),
}

impl IndexPicker {
    pub fn random() -> Self {
        Self::Random(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::Random(StdRng::seed_from_u64(seed))
    }

    pub fn fixed(index: usize, count: usize) -> WheelResult<Self> {
        if index >= count {
            return Err(WheelError::IndexOutOfRange { index, len: count });
        }
        Ok(Self::Fixed(index))
    }

    pub fn pick(&mut self, count: usize) -> usize {
        match self {
            Self::Random(rng) => rng.gen_range(0..count),
            Self::Fixed(index) => *index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-9, "expected {expected}, got {actual}");
    }

    #[test]
    fn first_prize_fifteen_spins() {
        assert_close(segment_center(8, 0), 22.5);
        assert_close(resolve_target(8, 270.0, 0, 15), 5647.5);
    }

    #[test]
    fn fifth_prize_six_spins() {
        assert_close(segment_center(8, 4), 202.5);
        assert_close(resolve_target(8, 270.0, 4, 6), 2227.5);
    }

    #[test]
    fn landing_wraps_when_center_is_past_pointer() {
        // center 292.5 is past the pointer, landing -22.5 wraps to 337.5
        assert_close(resolve_target(8, 270.0, 6, 1), 360.0 + 337.5);
    }

    #[test]
    fn target_range_and_decoding_hold_for_all_segments() {
        for count in 1..=16 {
            for pointer in [0.0, 90.0, 270.0, -45.0, 400.0] {
                for spins in [1, 6, 15] {
                    for index in 0..count {
                        let target = resolve_target(count, pointer, index, spins);
                        let floor = f64::from(spins) * 360.0;
                        assert!(
                            target >= floor && target < floor + 360.0,
                            "target {target} outside [{floor}, {})",
                            floor + 360.0
                        );
                        assert_eq!(segment_at_pointer(count, pointer, target), index);
                    }
                }
            }
        }
    }

    #[test]
    fn extra_whole_turns_keep_the_landing_segment() {
        let target = resolve_target(8, 270.0, 3, 6);
        let carried = whole_turns(5647.5) + target;
        assert_close(whole_turns(5647.5), 5400.0);
        assert_eq!(segment_at_pointer(8, 270.0, carried), 3);
    }

    #[test]
    fn fixed_picker_is_validated_and_stable() {
        assert!(matches!(
            IndexPicker::fixed(8, 8),
            Err(WheelError::IndexOutOfRange { index: 8, len: 8 })
        ));
        let mut picker = IndexPicker::fixed(0, 8).unwrap();
        assert!((0..10).all(|_| picker.pick(8) == 0));
    }

    #[test]
    fn seeded_picker_is_reproducible_and_in_range() {
        let mut a = IndexPicker::seeded(42);
        let mut b = IndexPicker::seeded(42);
        for _ in 0..100 {
            let x = a.pick(8);
            assert!(x < 8);
            assert_eq!(x, b.pick(8));
        }
    }

    #[test]
    fn spin_count_and_angle_validation() {
        assert!(matches!(validate_spins(0), Err(WheelError::InvalidSpinCount)));
        assert_eq!(validate_spins(6).unwrap(), 6);
        assert!(matches!(validate_angle(f64::NAN), Err(WheelError::InvalidAngle(_))));
        assert_close(validate_angle(270.0).unwrap(), 270.0);
    }
}
