//! The widget/scene glue: mount, label stripping, camera fitting, teardown.

use tracing::{debug, warn};

use crate::map::error::MapError;
use crate::map::types::{FitBoundsOptions, LngLat, LngLatBounds, MapConfig, MapEvent};
use crate::map::widget::{MapWidget, OverlayScene, SceneFactory, WidgetFactory};

/// Style layers ending in this suffix are stripped once the widget loads.
const LABEL_LAYER_SUFFIX: &str = "-label";

/// A mounted widget/scene pair.
///
/// Created through [`mount`](MapBinding::mount); dropping the binding tears
/// both halves down (widget first, then the scene attached to it).
pub struct MapBinding {
    widget: Box<dyn MapWidget>,
    scene: Box<dyn OverlayScene>,
}

impl MapBinding {
    /// Creates the widget from `config`, wires up label stripping, and
    /// attaches the overlay scene.
    ///
    /// Base-map labels clash with overlay layers, so every style layer whose
    /// id ends in `-label` is removed as soon as the style reports loaded.
    pub async fn mount(
        widgets: &dyn WidgetFactory,
        scenes: &dyn SceneFactory,
        config: MapConfig,
    ) -> Result<Self, MapError> {
        debug!(style = %config.style, "mounting map widget");
        let widget = widgets.create(&config).await?;

        widget.on(
            MapEvent::Load,
            Box::new(|map| {
                for layer_id in map.style_layers() {
                    if layer_id.ends_with(LABEL_LAYER_SUFFIX) {
                        if let Err(error) = map.remove_layer(&layer_id) {
                            warn!(%layer_id, %error, "failed to remove label layer");
                        }
                    }
                }
            }),
        );

        let scene = scenes.attach(widget.as_ref()).await?;
        Ok(Self { widget, scene })
    }

    /// Fits the camera so every coordinate is visible.
    ///
    /// No-op when `coordinates` is empty.
    pub fn fit_bounds(&self, coordinates: &[LngLat], options: &FitBoundsOptions) {
        let Some(bounds) = LngLatBounds::from_coordinates(coordinates) else {
            debug!("fit_bounds skipped, no coordinates");
            return;
        };
        self.widget.fit_bounds(bounds, options);
    }

    /// The underlying widget.
    pub fn widget(&self) -> &dyn MapWidget {
        self.widget.as_ref()
    }
}

impl Drop for MapBinding {
    // Widget first, then the scene that was attached to it.
    fn drop(&mut self) {
        self.widget.remove();
        self.scene.destroy();
    }
}
