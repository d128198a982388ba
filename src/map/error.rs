//! Error types for the map-binding layer.

use thiserror::Error;

/// Errors that can occur while mounting or driving a map binding.
///
/// Cloneable so a failed mount can serve as the rejection payload of a
/// [`SuspenseResource`](crate::SuspenseResource) and be replayed to every
/// reader.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MapError {
    /// The widget library failed to create a map instance.
    #[error("Widget creation failed: {0}")]
    WidgetCreation(String),

    /// The overlay engine failed to attach to the widget.
    #[error("Scene attach failed: {0}")]
    SceneAttach(String),

    /// A style layer id was not present on the widget.
    #[error("Unknown layer: {0}")]
    UnknownLayer(String),
}
