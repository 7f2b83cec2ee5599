//! Errors reported before a generation run starts.
//!
//! Generation itself has no recoverable failure modes: once the inputs are
//! validated a run either populates the whole field or aborts.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid grid size {width}x{height}: both dimensions must be non-zero")]
    InvalidGrid { width: usize, height: usize },

    #[error("grid {width}x{height} too small: non-wrapping axes need at least {min} tiles")]
    GridTooSmall { width: usize, height: usize, min: usize },

    #[error("white-noise generation needs at least one smoothing pass")]
    NoSmoothingPasses,

    #[error("invalid setting `{name}` = {value}: {reason}")]
    InvalidSetting {
        name: &'static str,
        value: i64,
        reason: &'static str,
    },

    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenerationError>;
