//! Capability traits for the two foreign libraries the binding glues
//! together.
//!
//! The widget library (base map) and the overlay engine (data layers on top
//! of it) are consumed as opaque capability objects: the binding only ever
//! talks to these traits, never to a concrete library. That keeps the glue
//! testable against the mocks in [`crate::map::mock`] and keeps the real
//! adapters out of this crate's dependency graph.

use async_trait::async_trait;

use crate::map::error::MapError;
use crate::map::types::{FitBoundsOptions, LngLatBounds, MapConfig, MapEvent};

/// Callback invoked when a subscribed [`MapEvent`] fires. The widget hands
/// itself back so the callback can drive it.
pub type EventCallback = Box<dyn Fn(&dyn MapWidget) + Send + Sync>;

/// Capability surface of a rendered map widget.
pub trait MapWidget: Send + Sync {
    /// Subscribes `callback` to `event`.
    fn on(&self, event: MapEvent, callback: EventCallback);

    /// Ids of the style layers currently present, in draw order.
    fn style_layers(&self) -> Vec<String>;

    /// Removes a style layer by id.
    fn remove_layer(&self, layer_id: &str) -> Result<(), MapError>;

    /// Moves the camera so `bounds` fits the viewport.
    fn fit_bounds(&self, bounds: LngLatBounds, options: &FitBoundsOptions);

    /// Releases the widget and everything it rendered.
    fn remove(&self);
}

/// Capability surface of an overlay scene attached on top of a widget.
pub trait OverlayScene: Send + Sync {
    /// Releases the scene and its layers.
    fn destroy(&self);
}

/// Creates map widgets from a configuration.
#[async_trait]
pub trait WidgetFactory: Send + Sync {
    async fn create(&self, config: &MapConfig) -> Result<Box<dyn MapWidget>, MapError>;
}

/// Attaches overlay scenes to an existing widget.
#[async_trait]
pub trait SceneFactory: Send + Sync {
    async fn attach(&self, widget: &dyn MapWidget) -> Result<Box<dyn OverlayScene>, MapError>;
}
