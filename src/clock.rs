// src/clock.rs

// clock module definition and implementations

// dependencies
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tokio::time::Instant;

/// Nanoseconds in `duration`, saturating at `u64::MAX` (about 584 years).
pub(crate) fn saturating_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

/// Clock trait to abstract time retrieval.
/// Implementors must be thread-safe (Send + Sync).
/// The `now` method returns the current time in nanoseconds as a u64.
/// The Debouncer reads it on every call, timer tick and flush, so an injected
/// clock makes burst decisions deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> Result<u64, ClockError>;
}

/// Clock error type
#[derive(Debug, Error)]
pub enum ClockError {
    #[error("system clock is set before the unix epoch")]
    SystemTimeError,
}

/// SystemClock implementation using the system time.
/// Returns the current time in nanoseconds since the Unix epoch.
/// Wall time can jump backwards; the debouncer treats that as a stale burst.
/// This is the default clock used by the Debouncer.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<u64, ClockError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(saturating_nanos)
            .map_err(|_| ClockError::SystemTimeError)
    }
}

/// Monotonic clock backed by `tokio::time::Instant`.
///
/// Reports nanoseconds elapsed since the clock was created. Because it reads
/// tokio's clock, it follows `tokio::time::pause` and `advance`, which keeps
/// the timer loop and the decision logic on the same timeline in tests.
#[derive(Debug, Clone)]
pub struct TokioClock {
    origin: Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Result<u64, ClockError> {
        Ok(saturating_nanos(self.origin.elapsed()))
    }
}
