// src/config.rs

//! Configuration types for the debouncer

// dependencies
use crate::errors::DebounceError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Callback receiving failures of trailing invocations driven by the timer,
/// which have no caller to return them to.
pub type ErrorHook = Arc<dyn Fn(&DebounceError) + Send + Sync>;

/// Configuration for debouncer behavior
#[derive(Clone)]
pub struct DebounceConfig {
    pub(crate) wait: Duration,
    pub(crate) leading: bool,
    pub(crate) trailing: bool,
    pub(crate) time_window: Option<Duration>,
    pub(crate) keep_strong_reference: bool,
    pub(crate) on_error: Option<ErrorHook>,
}

impl DebounceConfig {
    /// Create a new configuration with the required quiet period.
    /// Defaults to trailing-only delivery, no time window and a strong
    /// reference to the target.
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            leading: false,
            trailing: true,
            time_window: None,
            keep_strong_reference: true,
            on_error: None,
        }
    }

    /// Builder-style: set the quiet period
    pub fn wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    /// Builder-style: invoke on the first call of a burst
    pub fn leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    /// Builder-style: invoke once the burst settles
    pub fn trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }

    /// Builder-style: bound the latency between invocations of a
    /// continuously renewed burst
    pub fn time_window(mut self, time_window: Duration) -> Self {
        self.time_window = Some(time_window);
        self
    }

    /// Builder-style: hold the target weakly when `false`
    pub fn keep_strong_reference(mut self, keep: bool) -> Self {
        self.keep_strong_reference = keep;
        self
    }

    /// Builder-style: receive errors from timer-driven invocations
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&DebounceError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Validate the configuration.
    /// A time window shorter than `wait` is rejected rather than clamped.
    pub fn validate(&self) -> Result<(), DebounceError> {
        if self.wait.is_zero() {
            return Err(DebounceError::InvalidWait);
        }
        if let Some(time_window) = self.time_window {
            if time_window < self.wait {
                return Err(DebounceError::InvalidTimeWindow {
                    wait: self.wait,
                    time_window,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for DebounceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebounceConfig")
            .field("wait", &self.wait)
            .field("leading", &self.leading)
            .field("trailing", &self.trailing)
            .field("time_window", &self.time_window)
            .field("keep_strong_reference", &self.keep_strong_reference)
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
