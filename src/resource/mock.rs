//! # Mock Loaders
//!
//! Utilities for testing suspense-driven loading deterministically.
//!
//! Use [`controlled_loader`] to get a loader whose settlement the test
//! controls, and [`counted`] to wrap any loader with an invocation counter.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::oneshot;

/// Settles the loader returned by [`controlled_loader`].
///
/// Dropping the controller without resolving or rejecting leaves the load
/// unsettled forever, which is useful for pinning a resource in its pending
/// state.
pub struct LoadController<T, E> {
    tx: oneshot::Sender<Result<T, E>>,
}

impl<T, E> LoadController<T, E> {
    /// Settles the load successfully with `value`.
    pub fn resolve(self, value: T) {
        let _ = self.tx.send(Ok(value));
    }

    /// Settles the load with the failure payload `error`.
    pub fn reject(self, error: E) {
        let _ = self.tx.send(Err(error));
    }
}

/// Creates a loader that settles only when the returned controller says so.
pub fn controlled_loader<T, E>() -> (
    impl FnOnce() -> Pin<Box<dyn Future<Output = Result<T, E>> + Send>> + Send + 'static,
    LoadController<T, E>,
)
where
    T: Send + 'static,
    E: Send + 'static,
{
    let (tx, rx) = oneshot::channel::<Result<T, E>>();
    let loader = move || -> Pin<Box<dyn Future<Output = Result<T, E>> + Send>> {
        Box::pin(async move {
            match rx.await {
                Ok(outcome) => outcome,
                // Controller dropped: behave like a load that never settles.
                Err(_) => std::future::pending::<Result<T, E>>().await,
            }
        })
    };
    (loader, LoadController { tx })
}

/// Observes how many times a [`counted`] loader was invoked.
pub struct InvocationCount(Arc<AtomicU64>);

impl InvocationCount {
    /// Number of invocations so far.
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Wraps `loader` so each invocation bumps the returned counter.
pub fn counted<F, Fut>(loader: F) -> (impl FnOnce() -> Fut + Send + 'static, InvocationCount)
where
    F: FnOnce() -> Fut + Send + 'static,
{
    let calls = Arc::new(AtomicU64::new(0));
    let seen = InvocationCount(Arc::clone(&calls));
    let wrapped = move || {
        calls.fetch_add(1, Ordering::SeqCst);
        loader()
    };
    (wrapped, seen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn controlled_loader_settles_on_demand() {
        let (loader, control) = controlled_loader::<u32, String>();
        let future = loader();
        control.resolve(7);
        assert_eq!(future.await, Ok(7));
    }

    #[tokio::test]
    async fn controlled_loader_rejects_on_demand() {
        let (loader, control) = controlled_loader::<u32, String>();
        let future = loader();
        control.reject("nope".to_string());
        assert_eq!(future.await, Err("nope".to_string()));
    }

    #[tokio::test]
    async fn counted_records_the_invocation() {
        let (loader, calls) = counted(|| async { Ok::<_, String>(1u32) });
        assert_eq!(calls.get(), 0);
        let _ = loader().await;
        assert_eq!(calls.get(), 1);
    }
}
