//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown state type {0:?}")]
    UnknownStateType(String),

    #[error("unknown activity {0:?}")]
    UnknownActivity(String),

    #[error("invalid event time {time} on resource {resource:?}: must be finite and >= 0")]
    InvalidTime { resource: String, time: f64 },
}

/// Shorthand result type for `ps-core`.
pub type CoreResult<T> = Result<T, CoreError>;
