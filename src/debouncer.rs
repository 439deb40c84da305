// src/debouncer.rs

// debouncer: collapses bursts of calls into leading and/or trailing invocations.

// dependencies
use crate::clock::{Clock, SystemClock};
use crate::config::{DebounceConfig, ErrorHook};
use crate::errors::DebounceError;
use crate::state::{DebounceState, PendingTimer, remaining_wait, should_invoke};
use crate::target::{Target, TargetHandle};
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Outcome of an edge decision taken under the state lock.
/// `Call` is completed after the lock is released.
enum Edge<A, R> {
    Cached(Option<R>),
    Call(Arc<dyn Target<A, R>>, A),
}

/// What the timer loop does after one tick.
enum Tick<A, R> {
    Stale,
    Rearm(Duration),
    Settled(Result<Edge<A, R>, DebounceError>),
}

// state shared between the handle and its timer task
struct Shared<A, R, C> {
    target: TargetHandle<A, R>,
    clock: C,
    on_error: Option<ErrorHook>,
    state: Mutex<DebounceState<A, R>>,
}

impl<A, R, C> Shared<A, R, C>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
    C: Clock + 'static,
{
    // spawn a timer loop and make it the one owning the burst
    fn arm_timer(self: &Arc<Self>, state: &mut DebounceState<A, R>) {
        let id = state.next_timer_id();
        let task = tokio::spawn(Self::run_timer(Arc::downgrade(self), id));
        state.pending_timer = Some(PendingTimer { id, task });
    }

    // first call of a new burst
    fn leading_edge(
        self: &Arc<Self>,
        state: &mut DebounceState<A, R>,
        now: u64,
    ) -> Result<Edge<A, R>, DebounceError> {
        state.last_invoke_time = now;
        self.arm_timer(state);
        debug!(leading = state.leading, "debounce burst started");
        if state.leading {
            self.invoke_func(state, now)
        } else {
            Ok(Edge::Cached(state.cached_result.clone()))
        }
    }

    // claim the buffered arguments for delivery to the target
    fn invoke_func(
        &self,
        state: &mut DebounceState<A, R>,
        now: u64,
    ) -> Result<Edge<A, R>, DebounceError> {
        state.last_invoke_time = now;
        let Some(args) = state.last_args.take() else {
            return Ok(Edge::Cached(state.cached_result.clone()));
        };
        let target = self.target.resolve()?;
        Ok(Edge::Call(target, args))
    }

    // close the burst, delivering buffered arguments if trailing is enabled
    fn trailing_edge(
        &self,
        state: &mut DebounceState<A, R>,
        now: u64,
    ) -> Result<Edge<A, R>, DebounceError> {
        state.pending_timer = None;
        if state.trailing && state.last_args.is_some() {
            debug!("debounce trailing edge delivering");
            return self.invoke_func(state, now);
        }
        state.last_args = None;
        Ok(Edge::Cached(state.cached_result.clone()))
    }

    async fn complete(&self, edge: Edge<A, R>) -> Result<Option<R>, DebounceError> {
        match edge {
            Edge::Cached(result) => Ok(result),
            Edge::Call(target, args) => {
                let result = target
                    .call(args)
                    .await
                    .map_err(DebounceError::Invocation)?;
                self.state.lock().cached_result = Some(result.clone());
                Ok(Some(result))
            }
        }
    }

    fn timer_expired(&self, id: u64) -> Tick<A, R> {
        let mut state = self.state.lock();
        if !state.owns_timer(id) {
            return Tick::Stale;
        }
        let now = match self.clock.now() {
            Ok(now) => now,
            Err(err) => {
                // buffered args stay; the next call re-arms
                state.pending_timer = None;
                return Tick::Settled(Err(err.into()));
            }
        };
        if should_invoke(&state, now) {
            Tick::Settled(self.trailing_edge(&mut state, now))
        } else {
            Tick::Rearm(remaining_wait(&state, now))
        }
    }

    async fn run_timer(shared: Weak<Self>, id: u64) {
        loop {
            let Some(this) = shared.upgrade() else {
                return;
            };
            match this.timer_expired(id) {
                Tick::Stale => return,
                Tick::Rearm(delay) => {
                    trace!(timer = id, ?delay, "debounce timer re-armed");
                    drop(this);
                    tokio::time::sleep(delay).await;
                }
                Tick::Settled(edge) => {
                    let outcome = match edge {
                        Ok(edge) => this.complete(edge).await.map(|_| ()),
                        Err(err) => Err(err),
                    };
                    if let Err(err) = outcome {
                        this.report(&err);
                    }
                    return;
                }
            }
        }
    }

    // timer-driven failures have no caller to return to
    fn report(&self, err: &DebounceError) {
        warn!(error = %err, "debounced trailing invocation failed");
        if let Some(hook) = &self.on_error {
            hook(err);
        }
    }
}

/// A debounced handle over one target.
/// A is the argument type delivered to the target, R its result type.
/// C is the clock type, defaulting to SystemClock.
/// Calls must be made from within a tokio runtime, which drives the timer.
pub struct Debouncer<A, R, C = SystemClock>
where
    C: Clock,
{
    shared: Arc<Shared<A, R, C>>,
    config: DebounceConfig,
}

impl<A, R> Debouncer<A, R, SystemClock>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
{
    /// Wrap a target using the system clock.
    pub fn new<T: Target<A, R>>(
        target: Arc<T>,
        config: DebounceConfig,
    ) -> Result<Self, DebounceError> {
        Self::with_config(target, config, SystemClock)
    }
}

impl<A, R, C> Debouncer<A, R, C>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
    C: Clock + 'static,
{
    /// Wrap a target. When `keep_strong_reference` is off the caller must
    /// keep its own `Arc` alive for invocations to succeed.
    pub fn with_config<T: Target<A, R>>(
        target: Arc<T>,
        config: DebounceConfig,
        clock: C,
    ) -> Result<Self, DebounceError> {
        config.validate()?;
        let target = if config.keep_strong_reference {
            TargetHandle::owned(target)
        } else {
            TargetHandle::observed(&target)
        };
        let shared = Arc::new(Shared {
            target,
            clock,
            on_error: config.on_error.clone(),
            state: Mutex::new(DebounceState::new(&config)),
        });
        Ok(Self { shared, config })
    }

    pub fn wait(&self) -> Duration {
        self.config.wait
    }

    pub fn time_window(&self) -> Option<Duration> {
        self.config.time_window
    }

    pub fn leading(&self) -> bool {
        self.config.leading
    }

    pub fn trailing(&self) -> bool {
        self.config.trailing
    }

    /// True while a burst is open and a timer is waiting to close it.
    pub fn is_pending(&self) -> bool {
        self.shared.state.lock().pending_timer.is_some()
    }

    /// Request an invocation with `args`.
    ///
    /// Returns the fresh result when this call invokes the target (leading
    /// edge, or a time window running out mid-burst); otherwise the args are
    /// buffered for the trailing edge and the last cached result is returned.
    /// The cached result is the one from the invocation that completed last,
    /// which under overlapping slow calls is not necessarily the latest started.
    pub async fn invoke(&self, args: A) -> Result<Option<R>, DebounceError> {
        let now = self.shared.clock.now()?;
        let edge = {
            let mut state = self.shared.state.lock();
            let is_invoking = should_invoke(&state, now);
            state.last_args = Some(args);
            state.last_call_time = Some(now);

            if is_invoking && state.pending_timer.is_none() {
                self.shared.leading_edge(&mut state, now)?
            } else if is_invoking && state.time_window_nanos.is_some() {
                // window exhausted mid-burst: swap timers and deliver in one step
                debug!("debounce time window elapsed, forcing invocation");
                state.disarm();
                self.shared.arm_timer(&mut state);
                self.shared.invoke_func(&mut state, now)?
            } else {
                if state.pending_timer.is_none() {
                    self.shared.arm_timer(&mut state);
                }
                Edge::Cached(state.cached_result.clone())
            }
        };
        self.shared.complete(edge).await
    }

    /// Drop buffered arguments and disarm the timer. The next call starts a
    /// fresh burst. A tick already waiting on the state lock will find its
    /// timer gone and do nothing.
    pub fn cancel(&self) {
        let mut state = self.shared.state.lock();
        state.disarm();
        state.last_invoke_time = 0;
        state.last_args = None;
        state.last_call_time = None;
        debug!("debounce cancelled");
    }

    /// Run the trailing edge now if a burst is open; otherwise return the
    /// cached result without invoking.
    pub async fn flush(&self) -> Result<Option<R>, DebounceError> {
        let edge = {
            let mut state = self.shared.state.lock();
            if state.pending_timer.is_none() {
                return Ok(state.cached_result.clone());
            }
            let now = self.shared.clock.now()?;
            state.disarm();
            debug!("debounce flushed");
            self.shared.trailing_edge(&mut state, now)?
        };
        self.shared.complete(edge).await
    }
}

impl<A, R, C> Drop for Debouncer<A, R, C>
where
    C: Clock,
{
    fn drop(&mut self) {
        if let Some(timer) = self.shared.state.lock().pending_timer.take() {
            timer.task.abort();
        }
    }
}

impl<A, R, C> fmt::Debug for Debouncer<A, R, C>
where
    A: 'static,
    R: 'static,
    C: Clock,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("config", &self.config)
            .field("pending", &self.shared.state.lock().pending_timer.is_some())
            .field("target_alive", &self.shared.target.is_alive())
            .finish()
    }
}
