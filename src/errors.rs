// src/errors.rs

// error handling for the debouncer type

// dependencies
use std::time::Duration;
use thiserror::Error;

use crate::clock::ClockError;

/// Boxed error produced by a wrapped target.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for Debouncer configuration and invocation failures.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DebounceError {
    #[error("wait must be a positive duration")]
    InvalidWait,
    #[error("time window {time_window:?} is shorter than wait {wait:?}")]
    InvalidTimeWindow { wait: Duration, time_window: Duration },
    #[error("debounced target has been dropped")]
    TargetCollected,
    #[error("debounced target failed: {0}")]
    Invocation(#[source] BoxError),
    #[error("clock error occurred: {0}")]
    ClockError(#[from] ClockError),
}

impl DebounceError {
    /// True for the errors raised when a configuration is rejected at wrap time.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(
            self,
            DebounceError::InvalidWait | DebounceError::InvalidTimeWindow { .. }
        )
    }
}
