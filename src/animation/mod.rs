pub mod pulse;
pub mod spinner;
pub mod tween;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::WheelError;

pub use tween::TweenAnimator;

/// Easing profile for a tween.
///
/// Power curves follow the common `powerN` naming: `power1` is quadratic,
/// `power2` cubic, `power3` quartic, `power4` quintic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    In(u8),
    Out(u8),
    InOut(u8),
}

impl Easing {
    /// Map linear progress `t` (clamped to `0.0..=1.0`) onto the curve
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::In(power) => t.powi(exponent(power)),
            Easing::Out(power) => 1.0 - (1.0 - t).powi(exponent(power)),
            Easing::InOut(power) => {
                let e = exponent(power);
                if t < 0.5 {
                    (2.0 * t).powi(e) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(e) / 2.0
                }
            }
        }
    }
}

fn exponent(power: u8) -> i32 {
    i32::from(power) + 1
}

impl FromStr for Easing {
    type Err = WheelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let (curve, direction) = match lower.split_once('.') {
            Some((curve, direction)) => (curve, Some(direction)),
            None => (lower.as_str(), None),
        };

        let power = match curve {
            "none" | "linear" => return Ok(Easing::Linear),
            "quad" => 1,
            "cubic" => 2,
            "quart" => 3,
            "quint" | "strong" => 4,
            p if p.starts_with("power") => p["power".len()..]
                .parse::<u8>()
                .ok()
                .filter(|n| *n <= 4)
                .ok_or_else(|| WheelError::InvalidEasing(s.to_string()))?,
            _ => return Err(WheelError::InvalidEasing(s.to_string())),
        };

        if power == 0 {
            return Ok(Easing::Linear);
        }

        match direction {
            None | Some("out") => Ok(Easing::Out(power)),
            Some("in") => Ok(Easing::In(power)),
            Some("inout") => Ok(Easing::InOut(power)),
            Some(_) => Err(WheelError::InvalidEasing(s.to_string())),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => write!(f, "linear"),
            Easing::In(p) => write!(f, "power{p}.in"),
            Easing::Out(p) => write!(f, "power{p}.out"),
            Easing::InOut(p) => write!(f, "power{p}.inOut"),
        }
    }
}

pub fn deserialize_easing<'de, D>(deserializer: D) -> Result<Easing, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

/// Linear interpolation
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: &[Easing] = &[
        Easing::Linear,
        Easing::In(2),
        Easing::Out(3),
        Easing::InOut(2),
        Easing::InOut(4),
    ];

    #[test]
    fn curves_pin_endpoints() {
        for easing in CURVES {
            assert_eq!(easing.apply(0.0), 0.0, "{easing}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{easing}");
            assert_eq!(easing.apply(-3.0), 0.0);
            assert!((easing.apply(7.0) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in CURVES {
            let mut last = 0.0;
            for step in 1..=200 {
                let v = easing.apply(step as f64 / 200.0);
                assert!(v >= last, "{easing} decreased at step {step}");
                last = v;
            }
        }
    }

    #[test]
    fn in_out_is_symmetric_around_midpoint() {
        let e = Easing::InOut(4);
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12);
        // quintic: (2 * 0.25)^5 / 2
        assert!((e.apply(0.25) - 0.015625).abs() < 1e-12);
    }

    #[test]
    fn parses_power_names() {
        assert_eq!("power4.inOut".parse::<Easing>().unwrap(), Easing::InOut(4));
        assert_eq!("power2.inOut".parse::<Easing>().unwrap(), Easing::InOut(2));
        assert_eq!("power3".parse::<Easing>().unwrap(), Easing::Out(3));
        assert_eq!("power1.in".parse::<Easing>().unwrap(), Easing::In(1));
        assert_eq!("cubic.out".parse::<Easing>().unwrap(), Easing::Out(2));
        assert_eq!("none".parse::<Easing>().unwrap(), Easing::Linear);
        assert_eq!("power0.inOut".parse::<Easing>().unwrap(), Easing::Linear);
    }

    #[test]
    fn rejects_unknown_names() {
        for bad in ["bounce", "power9", "power2.sideways", ""] {
            assert!(
                matches!(bad.parse::<Easing>(), Err(WheelError::InvalidEasing(_))),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn display_round_trips() {
        for easing in CURVES {
            assert_eq!(easing.to_string().parse::<Easing>().unwrap(), *easing);
        }
    }

    #[test]
    fn lerp_clamps_progress() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 2.0), 10.0);
        assert_eq!(lerp(4.0, 2.0, -1.0), 4.0);
    }
}
