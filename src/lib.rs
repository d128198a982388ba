//! # Mapbind
//!
//! > **A suspending resource cache, and the map binding built on top of it.**
//!
//! This crate provides [`SuspenseResource`], a small concurrency primitive
//! that turns an arbitrary asynchronous load into a value a cooperative
//! scheduler can read synchronously, plus the glue that uses it to mount a
//! map widget and its overlay scene.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### The suspend protocol
//!
//! A scheduler calls [`SuspenseResource::read`] and pattern-matches the
//! outcome:
//! - [`ReadOutcome::Ready`]: the value is cached, use it.
//! - [`ReadOutcome::Pending`]: the load is in flight. The outcome carries a
//!   [`LoadHandle`]; await [`LoadHandle::settled`] and call `read` again.
//! - [`ReadOutcome::Failed`]: the load failed once and reports the same
//!   payload forever.
//!
//! The loader runs **at most once** no matter how many callers race on
//! `read`/`preload`. That single invocation, and the monotonic
//! `Initial → Pending → {Resolved | Rejected}` state machine behind it, is
//! the core contract of the crate.
//!
//! ### Generics: The Power of `T`
//! [`SuspenseResource<T, E>`] caches *anything* that is `Clone + Send`. The
//! map layer instantiates it with `Arc<MapBinding>`, but the cell neither
//! knows nor cares what it holds.
//!
//! ### Mocking: Testing without Pain
//! Asynchronous loads are hard to test deterministically. The
//! [`resource::mock`] module ships controllable loaders (the test decides
//! when they settle), and [`map::mock`] ships a recording widget/scene pair.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`resource`])
//! The suspending cache cell. One state machine, one lock, one spawned
//! settle task per load.
//! - **Key items**: [`SuspenseResource`], [`ReadOutcome`], [`LoadHandle`].
//!
//! ### 2. The Domain ([`map`])
//! Capability traits for the two foreign libraries (widget and overlay
//! scene), the geo/config types, and [`MapBinding`](map::MapBinding), the
//! glue that mounts, strips labels, fits the camera, and tears down.
//!
//! ### 3. The Orchestrator ([`lifecycle`])
//! [`MapSession`](lifecycle::MapSession) wires factories and configuration
//! into a suspense-cached mount, and
//! [`setup_tracing`](lifecycle::setup_tracing) initializes structured
//! logging.
//!
//! ## 🚀 Quick Start
//!
//! ```ignore
//! use mapbind::{ReadOutcome, SuspenseResource};
//!
//! let resource = SuspenseResource::new(|| async { fetch_regions().await });
//!
//! // Scheduler-facing access:
//! match resource.read() {
//!     ReadOutcome::Ready(regions) => render(regions),
//!     ReadOutcome::Pending(handle) => suspend_until(handle),
//!     ReadOutcome::Failed(error) => show_error(error),
//! }
//!
//! // Or, for callers that do not speak the protocol:
//! resource.preload();
//! let regions = resource.load().await?;
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod lifecycle;
pub mod map;
pub mod resource;

pub use resource::{LoadHandle, ReadOutcome, SuspenseResource};
