//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for binaries and tests
//! that embed this crate.
//!
//! ## What Gets Traced
//!
//! - **Resource transitions**: load started / resolved / rejected, with the
//!   cached value type as a structured field
//! - **Binding operations**: widget mounts, label-layer removals that fail,
//!   skipped no-op fits
//!
//! ## Usage
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo run
//!
//! # Show every state transition
//! RUST_LOG=debug cargo run
//!
//! # Filter to the resource engine only
//! RUST_LOG=mapbind::resource=debug cargo run
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Module paths are noise; transitions carry a value_type field
        .compact()
        .init();
}
