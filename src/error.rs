//! Configuration errors
//!
//! The simulation has no failure paths of its own; everything that can go
//! wrong is caught while loading or validating a [`crate::Tuning`].

#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("Invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Non-finite value for {0}")]
    NonFinite(&'static str),

    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("Gap floor {min} must be below gap ceiling {max}")]
    GapRange { min: f32, max: f32 },

    #[error("Speed multiplier cap must be at least 1 (got {0})")]
    SpeedCap(f32),

    #[error("Combo tiers must have strictly increasing thresholds and multipliers")]
    ComboTiers,

    #[error("{field} must be within [0, 1] (got {value})")]
    Probability { field: &'static str, value: f32 },
}
