// src/target.rs

//! The wrapped callable and the handle that resolves it at invocation time.

// dependencies
use crate::errors::{BoxError, DebounceError};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::{Arc, Weak};

/// A callable the debouncer delivers buffered arguments to.
///
/// Implemented for every async closure `Fn(A) -> impl Future<Output = Result<R, E>>`.
/// Wrap synchronous functions with [`sync_fn`].
pub trait Target<A, R>: Send + Sync + 'static {
    fn call(&self, args: A) -> BoxFuture<'static, Result<R, BoxError>>;
}

impl<A, R, E, F, Fut> Target<A, R> for F
where
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    E: Into<BoxError>,
{
    fn call(&self, args: A) -> BoxFuture<'static, Result<R, BoxError>> {
        (self)(args).map(|result| result.map_err(Into::into)).boxed()
    }
}

/// Adapter turning a synchronous function into a [`Target`].
#[derive(Debug, Clone)]
pub struct SyncTarget<F>(F);

/// Wrap a synchronous `Fn(A) -> Result<R, E>` so it can be debounced.
pub fn sync_fn<F>(f: F) -> SyncTarget<F> {
    SyncTarget(f)
}

impl<A, R, E, F> Target<A, R> for SyncTarget<F>
where
    F: Fn(A) -> Result<R, E> + Send + Sync + 'static,
    R: Send + 'static,
    E: Into<BoxError>,
{
    fn call(&self, args: A) -> BoxFuture<'static, Result<R, BoxError>> {
        let result = (self.0)(args).map_err(Into::into);
        futures::future::ready(result).boxed()
    }
}

/// How the debouncer holds its target.
/// `Owned` keeps the target alive for the debouncer's lifetime; `Observed`
/// lets it be dropped by its owner, after which invocations fail.
pub enum TargetHandle<A, R> {
    Owned(Arc<dyn Target<A, R>>),
    Observed(Weak<dyn Target<A, R>>),
}

impl<A: 'static, R: 'static> TargetHandle<A, R> {
    pub fn owned<T: Target<A, R>>(target: Arc<T>) -> Self {
        let target: Arc<dyn Target<A, R>> = target;
        TargetHandle::Owned(target)
    }

    pub fn observed<T: Target<A, R>>(target: &Arc<T>) -> Self {
        let target: Arc<dyn Target<A, R>> = Arc::clone(target) as Arc<dyn Target<A, R>>;
        TargetHandle::Observed(Arc::downgrade(&target))
    }

    /// Resolve the handle to a callable target.
    /// Fails with `TargetCollected` once an observed target has been dropped.
    pub fn resolve(&self) -> Result<Arc<dyn Target<A, R>>, DebounceError> {
        match self {
            TargetHandle::Owned(target) => Ok(Arc::clone(target)),
            TargetHandle::Observed(target) => {
                target.upgrade().ok_or(DebounceError::TargetCollected)
            }
        }
    }

    pub fn is_alive(&self) -> bool {
        match self {
            TargetHandle::Owned(_) => true,
            TargetHandle::Observed(target) => target.strong_count() > 0,
        }
    }
}
