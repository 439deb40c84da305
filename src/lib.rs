// src/lib.rs

//! # Debouncer
//!
//! Collapses bursts of closely spaced calls into a bounded number of
//! invocations of a wrapped sync or async target, with leading and trailing
//! edge delivery and an optional time window capping the latency between
//! invocations.
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use std::convert::Infallible;
//! use std::sync::Arc;
//! use std::time::Duration;
//! use debouncer::{DebounceConfig, Debouncer};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), debouncer::DebounceError> {
//! let save = Arc::new(|text: String| async move {
//!     println!("saving {text}");
//!     Ok::<_, Infallible>(text.len())
//! });
//!
//! let config = DebounceConfig::new(Duration::from_millis(250)).leading(true);
//! let debounced = Debouncer::new(save, config)?;
//!
//! debounced.invoke("h".to_string()).await?;      // saved now
//! debounced.invoke("he".to_string()).await?;     // buffered
//! debounced.invoke("hello".to_string()).await?;  // saved 250ms from now
//! # Ok(()) }
//! ```

// private modules
mod clock;
mod config;
mod debouncer;
mod errors;
mod state;
mod target;

// public API exports
pub use clock::{Clock, ClockError, SystemClock, TokioClock};
pub use config::{DebounceConfig, ErrorHook};
pub use debouncer::Debouncer;
pub use errors::{BoxError, DebounceError};
pub use target::{SyncTarget, Target, TargetHandle, sync_fn};
