// src/state.rs

// burst state and the pure decision functions driving it

// dependencies
use crate::clock::saturating_nanos;
use crate::config::DebounceConfig;
use std::time::Duration;
use tokio::task::JoinHandle;

/// The timer task currently allowed to close the burst.
/// A tick whose `id` no longer matches has been cancelled or superseded.
#[derive(Debug)]
pub(crate) struct PendingTimer {
    pub(crate) id: u64,
    pub(crate) task: JoinHandle<()>,
}

/// Mutable state of one debounced target. All times are clock nanoseconds.
#[derive(Debug)]
pub(crate) struct DebounceState<A, R> {
    pub(crate) wait_nanos: u64,
    pub(crate) time_window_nanos: Option<u64>,
    pub(crate) leading: bool,
    pub(crate) trailing: bool,
    pub(crate) last_args: Option<A>,
    pub(crate) last_call_time: Option<u64>,
    pub(crate) last_invoke_time: u64,
    pub(crate) pending_timer: Option<PendingTimer>,
    pub(crate) cached_result: Option<R>,
    timer_seq: u64,
}

impl<A, R> DebounceState<A, R> {
    pub(crate) fn new(config: &DebounceConfig) -> Self {
        Self {
            wait_nanos: saturating_nanos(config.wait),
            time_window_nanos: config.time_window.map(saturating_nanos),
            leading: config.leading,
            trailing: config.trailing,
            last_args: None,
            last_call_time: None,
            last_invoke_time: 0,
            pending_timer: None,
            cached_result: None,
            timer_seq: 0,
        }
    }

    // hand out the id for the next timer task
    pub(crate) fn next_timer_id(&mut self) -> u64 {
        self.timer_seq += 1;
        self.timer_seq
    }

    pub(crate) fn owns_timer(&self, id: u64) -> bool {
        self.pending_timer.as_ref().is_some_and(|timer| timer.id == id)
    }

    /// Abort the outstanding timer task, if any.
    pub(crate) fn disarm(&mut self) {
        if let Some(timer) = self.pending_timer.take() {
            timer.task.abort();
        }
    }
}

/// Whether a call or tick at `now` is entitled to invoke the target.
///
/// True on a cold start, once `wait` has elapsed since the last call, when the
/// clock has gone backwards since the last call, or when the time window since
/// the last invocation is used up.
pub(crate) fn should_invoke<A, R>(state: &DebounceState<A, R>, now: u64) -> bool {
    let Some(last_call) = state.last_call_time else {
        return true;
    };
    let Some(since_call) = now.checked_sub(last_call) else {
        return true;
    };
    if since_call >= state.wait_nanos {
        return true;
    }
    match state.time_window_nanos {
        Some(window) => now.saturating_sub(state.last_invoke_time) >= window,
        None => false,
    }
}

/// Delay until the timer should look at the burst again.
/// Never later than the time window allows.
pub(crate) fn remaining_wait<A, R>(state: &DebounceState<A, R>, now: u64) -> Duration {
    let since_call = state
        .last_call_time
        .map_or(0, |last_call| now.saturating_sub(last_call));
    let waiting = state.wait_nanos.saturating_sub(since_call);

    let nanos = match state.time_window_nanos {
        Some(window) => {
            let since_invoke = now.saturating_sub(state.last_invoke_time);
            waiting.min(window.saturating_sub(since_invoke))
        }
        None => waiting,
    };
    Duration::from_nanos(nanos)
}
