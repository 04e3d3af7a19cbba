use thiserror::Error;

/// Unified error type for prize-wheel
#[derive(Error, Debug)]
pub enum WheelError {
    #[error("prize list is empty: the wheel needs at least one prize")]
    EmptyPrizeList,

    #[error("prize index {index} out of range for {len} prizes")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("spin count must be at least one full revolution")]
    InvalidSpinCount,

    #[error("invalid angle: {0}")]
    InvalidAngle(f64),

    #[error("unknown easing: \"{0}\"")]
    InvalidEasing(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type WheelResult<T> = Result<T, WheelError>;
