//! Error types
//!
//! Only two things can fail: building a session from bad tuning, and the
//! storage behind the best score. Neither surfaces during ticking.

use thiserror::Error;

/// Tuning rejected at session construction
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field}: range is empty or inverted ({min} .. {max})")]
    InvalidRange { field: &'static str, min: f64, max: f64 },
    #[error("{field}: must be greater than zero")]
    ZeroDuration { field: &'static str },
    #[error("{field}: {value} is not a finite, non-negative number")]
    InvalidValue { field: &'static str, value: f64 },
    #[error("lane weights: {floating} floating out of {total} total draws")]
    InvalidLaneWeights { floating: u32, total: u32 },
    #[error("hitbox width scale {0} must be in (0, 1]")]
    InvalidHitboxScale(f32),
    #[error("hitbox height trim {trim} leaves nothing of a {min_height} tall obstacle")]
    HitboxTrimTooLarge { trim: f32, min_height: f32 },
    #[error("failed to parse tuning: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Best-score storage failure
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage format: {0}")]
    Format(#[from] serde_json::Error),
    #[error("storage unavailable")]
    Unavailable,
}
