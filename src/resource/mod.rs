//! The suspending resource engine.
//!
//! This module provides the core primitive for memoizing a single
//! asynchronous load behind a synchronous read.
//!
//! # Main Components
//!
//! - [`SuspenseResource`] - The one-shot cache cell around a deferred load
//! - [`ReadOutcome`] - What a read observes: ready, pending, or failed
//! - [`LoadHandle`] - Reference to an in-flight load, awaitable by schedulers
//!
//! # Testing
//!
//! See [`mock`] module for controllable loaders that settle on demand.

pub mod cell;
pub mod mock;

// Re-export the cell types for convenience
pub use cell::*;
