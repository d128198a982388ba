//! Session orchestration and observability.

pub mod session;
pub mod tracing;

pub use session::MapSession;
pub use tracing::setup_tracing;
