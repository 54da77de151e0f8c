//! Threshold validation errors (fatal at initialization).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThresholdError {
    #[error("threshold '{name}' must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("threshold fraction '{name}' must be in (0, 1], got {value}")]
    FractionOutOfRange { name: &'static str, value: f32 },

    #[error("threshold '{name}' ({value}) exceeds the score scale ({scale})")]
    AboveScale {
        name: &'static str,
        value: f32,
        scale: f32,
    },
}
