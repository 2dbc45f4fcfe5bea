// File: crates/chart-core/src/error.rs
// Summary: Error taxonomy for validation and lifecycle failures.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Everything that can go wrong while loading or driving a chart control.
///
/// All variants are raised synchronously and before any shared state is
/// mutated; nothing here is retryable.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("series key was not provided or is empty")]
    UniqueKeyNotProvided,

    #[error("series key '{0}' is already loaded in this chart")]
    DuplicateKey(String),

    #[error("series '{0}' has no values")]
    NoValuesProvided(String),

    #[error("series '{key}': x value at index {index} does not match axis type, expected {expected}")]
    InvalidFormatType {
        key: String,
        index: usize,
        expected: &'static str,
    },

    #[error("series '{key}': region {index} has malformed bounds")]
    InvalidRegionBounds { key: String, index: usize },

    #[error("transition duration must be a finite, non-negative number of milliseconds, got {0}")]
    InvalidTransitionDuration(f64),

    #[error("control '{0}' has not been loaded")]
    ControlNotLoaded(String),

    #[error("control '{0}' was unloaded and cannot be reused")]
    ControlUnloaded(String),

    #[error("invalid chart configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
