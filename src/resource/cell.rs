//! # The Suspending Cache Cell
//!
//! This module defines the single state machine at the heart of the crate.
//!
//! ## Key Types
//!
//! - [`SuspenseResource`]: wraps one deferred load and memoizes its outcome.
//! - [`ReadOutcome`]: the tagged result of a read (ready / pending / failed).
//! - [`LoadHandle`]: a reference to the in-flight load that a scheduler can
//!   await before retrying the read.
//!
//! ## The contract
//!
//! The cell moves monotonically through
//! `Initial → Pending → {Resolved | Rejected}`. The loader is consumed by
//! the `Initial → Pending` swap, so it cannot run twice regardless of how
//! many callers race on [`read`](SuspenseResource::read) and
//! [`preload`](SuspenseResource::preload). Terminal states persist for the
//! cell's lifetime; a rejected load is never retried (construct a new
//! resource for that).

use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, info, warn};

type LoadFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;
type Loader<T, E> = Box<dyn FnOnce() -> LoadFuture<T, E> + Send>;

// =============================================================================
// 1. THE IN-FLIGHT HANDLE
// =============================================================================

/// A reference to a started-but-not-yet-settled load.
///
/// Handles are cheap to clone; every clone refers to the same underlying
/// operation. A scheduler that observes [`ReadOutcome::Pending`] awaits
/// [`settled`](LoadHandle::settled) and then retries the read, which is
/// guaranteed to observe a terminal state.
#[derive(Clone)]
pub struct LoadHandle {
    op: Arc<()>,
    settled: watch::Receiver<bool>,
}

impl LoadHandle {
    fn new() -> (Self, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(false);
        let handle = Self {
            op: Arc::new(()),
            settled: rx,
        };
        (handle, tx)
    }

    /// Completes once the load has committed a terminal state.
    ///
    /// If the load was abandoned (its task dropped without settling), this
    /// never completes, which is the same behavior a never-settling load has:
    /// started loads cannot be cancelled.
    pub async fn settled(&self) {
        let mut rx = self.settled.clone();
        if rx.wait_for(|settled| *settled).await.is_err() {
            // Settle signal dropped without firing: the load will never
            // commit, so there is nothing to wake up for.
            std::future::pending::<()>().await;
        }
    }

    /// Whether the load has already committed a terminal state.
    pub fn is_settled(&self) -> bool {
        *self.settled.borrow()
    }

    /// Whether two handles refer to the same load.
    ///
    /// This is the identity check a scheduler uses to tell "still the same
    /// in-flight operation" from a failure payload.
    pub fn same_operation(&self, other: &LoadHandle) -> bool {
        Arc::ptr_eq(&self.op, &other.op)
    }
}

impl std::fmt::Debug for LoadHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadHandle")
            .field("settled", &self.is_settled())
            .finish()
    }
}

// =============================================================================
// 2. READ OUTCOMES
// =============================================================================

/// What a call to [`SuspenseResource::read`] observes.
///
/// This is the suspend protocol as a value: instead of throwing an in-flight
/// marker, the read returns a tag the calling scheduler pattern-matches on.
#[derive(Debug)]
pub enum ReadOutcome<T, E> {
    /// The load settled successfully; here is the cached value.
    Ready(T),
    /// The load is in flight. Await the handle, then read again.
    Pending(LoadHandle),
    /// The load settled with this failure; every future read repeats it.
    Failed(E),
}

// =============================================================================
// 3. THE STATE MACHINE
// =============================================================================

/// Internal cell state. State and payload live in one tagged union so they
/// can never disagree.
enum LoadState<T, E> {
    Initial(Loader<T, E>),
    Pending(LoadHandle),
    Resolved(T),
    Rejected(E),
}

impl<T, E> LoadState<T, E> {
    fn name(&self) -> &'static str {
        match self {
            LoadState::Initial(_) => "initial",
            LoadState::Pending(_) => "pending",
            LoadState::Resolved(_) => "resolved",
            LoadState::Rejected(_) => "rejected",
        }
    }
}

// =============================================================================
// 4. THE RESOURCE
// =============================================================================

/// Memoizes one asynchronous load behind a synchronous read.
///
/// The resource is a cheap handle onto a shared cell; clone it freely and
/// hand clones to every caller that needs the value. The loader supplied at
/// construction is invoked at most once, on the first `read` or `preload`,
/// and its outcome is replayed to every subsequent read.
///
/// The first trigger spawns the settle task on the ambient tokio runtime, so
/// `read` and `preload` must be called from within a runtime context.
pub struct SuspenseResource<T, E> {
    cell: Arc<Mutex<LoadState<T, E>>>,
}

impl<T, E> Clone for SuspenseResource<T, E> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T, E> SuspenseResource<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Captures `loader` without invoking it. The cell starts out `Initial`.
    pub fn new<F, Fut>(loader: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let loader: Loader<T, E> = Box::new(move || Box::pin(loader()));
        Self {
            cell: Arc::new(Mutex::new(LoadState::Initial(loader))),
        }
    }

    /// Reads the cell, triggering the load on first contact.
    ///
    /// - `Initial`: starts the load and returns [`ReadOutcome::Pending`]
    ///   with a handle to it.
    /// - `Pending`: returns the *same* in-flight handle again; the loader is
    ///   not re-invoked.
    /// - `Resolved`: returns [`ReadOutcome::Ready`] with a clone of the
    ///   value (the only normal-value path).
    /// - `Rejected`: returns [`ReadOutcome::Failed`] with a clone of the
    ///   failure payload, unchanged, every time.
    pub fn read(&self) -> ReadOutcome<T, E> {
        let (outcome, begun) = {
            let mut state = self.cell.lock().unwrap();
            match &*state {
                LoadState::Initial(_) => {
                    let (handle, loader, settle) = Self::begin(&mut state);
                    (ReadOutcome::Pending(handle), Some((loader, settle)))
                }
                LoadState::Pending(handle) => (ReadOutcome::Pending(handle.clone()), None),
                LoadState::Resolved(value) => (ReadOutcome::Ready(value.clone()), None),
                LoadState::Rejected(error) => (ReadOutcome::Failed(error.clone()), None),
            }
        };
        if let Some((loader, settle)) = begun {
            self.run_loader(loader, settle);
        }
        outcome
    }

    /// Starts the load without observing it.
    ///
    /// Warms the cell ahead of a synchronous read; surfaces neither a value
    /// nor a signal. No-op in every state but `Initial`.
    pub fn preload(&self) {
        let begun = {
            let mut state = self.cell.lock().unwrap();
            match &*state {
                LoadState::Initial(_) => {
                    let (_handle, loader, settle) = Self::begin(&mut state);
                    Some((loader, settle))
                }
                other => {
                    debug!(state = other.name(), "preload skipped");
                    None
                }
            }
        };
        if let Some((loader, settle)) = begun {
            self.run_loader(loader, settle);
        }
    }

    /// Await-based access for callers that do not speak the suspend
    /// protocol: triggers the load if necessary and resolves once it
    /// settles.
    pub async fn load(&self) -> Result<T, E> {
        loop {
            match self.read() {
                ReadOutcome::Ready(value) => return Ok(value),
                ReadOutcome::Failed(error) => return Err(error),
                ReadOutcome::Pending(handle) => handle.settled().await,
            }
        }
    }

    /// Swaps `Initial → Pending`, consuming the stored loader.
    ///
    /// Must only be called while the cell lock is held and the state is
    /// `Initial`; the swap is what makes a second invocation impossible.
    fn begin(state: &mut LoadState<T, E>) -> (LoadHandle, Loader<T, E>, watch::Sender<bool>) {
        let (handle, settle) = LoadHandle::new();
        match mem::replace(&mut *state, LoadState::Pending(handle.clone())) {
            LoadState::Initial(loader) => (handle, loader, settle),
            _ => unreachable!("begin is only reached while the cell is Initial"),
        }
    }

    /// Invokes the loader and spawns the settle task that commits the
    /// outcome. The loader runs outside the cell lock; user code never
    /// holds it.
    fn run_loader(&self, loader: Loader<T, E>, settle: watch::Sender<bool>) {
        let value_type = short_type_name::<T>();
        debug!(value_type, "load started");
        let future = loader();
        let cell = Arc::clone(&self.cell);
        tokio::spawn(async move {
            let outcome = future.await;
            {
                let mut state = cell.lock().unwrap();
                // Commit only if this load is still the one in flight.
                if matches!(*state, LoadState::Pending(_)) {
                    *state = match outcome {
                        Ok(value) => {
                            info!(value_type, "load resolved");
                            LoadState::Resolved(value)
                        }
                        Err(error) => {
                            warn!(value_type, "load rejected");
                            LoadState::Rejected(error)
                        }
                    };
                }
            }
            // Wake waiters only after the terminal state is visible.
            let _ = settle.send(true);
        });
    }
}

/// Just the type name (e.g., "Region" instead of "mapbind::map::Region").
fn short_type_name<T>() -> &'static str {
    std::any::type_name::<T>().split("::").last().unwrap_or("Unknown")
}

// =============================================================================
// 5. TESTS
// =============================================================================
