//! The session that owns a suspense-cached map mount.

use std::sync::Arc;

use crate::map::binding::MapBinding;
use crate::map::error::MapError;
use crate::map::types::{FitBoundsOptions, LngLat, MapConfig};
use crate::map::widget::{SceneFactory, WidgetFactory};
use crate::resource::{ReadOutcome, SuspenseResource};

/// Owns the lazily-mounted binding of one map widget and overlay scene.
///
/// `MapSession` is responsible for:
/// - **Dependency Wiring**: handing the widget and scene factories to the
///   mount loader
/// - **Memoization**: the mount runs at most once, cached in a
///   [`SuspenseResource`]
/// - **Lifecycle**: dropping the session releases the binding; the widget
///   and scene are torn down with the binding's last reference
///
/// A mount still in flight when the session is dropped completes on its own
/// (started loads are not cancelled) and tears down as soon as the settled
/// cell, its last owner, is released.
///
/// # Example
///
/// ```ignore
/// let session = MapSession::new(widgets, scenes, MapConfig::default());
///
/// // Warm the mount before the first paint needs it.
/// session.preload();
///
/// // Scheduler-facing access:
/// match session.read() {
///     ReadOutcome::Ready(binding) => paint(binding),
///     ReadOutcome::Pending(handle) => suspend_until(handle),
///     ReadOutcome::Failed(error) => show_error(error),
/// }
/// ```
pub struct MapSession {
    binding: SuspenseResource<Arc<MapBinding>, MapError>,
}

impl MapSession {
    /// Wires the factories and configuration into a lazily-mounted binding.
    ///
    /// Nothing is created yet; the first `preload`, `read`, or `binding`
    /// call triggers the mount.
    pub fn new(
        widgets: Arc<dyn WidgetFactory>,
        scenes: Arc<dyn SceneFactory>,
        config: MapConfig,
    ) -> Self {
        let binding = SuspenseResource::new(move || async move {
            MapBinding::mount(widgets.as_ref(), scenes.as_ref(), config)
                .await
                .map(Arc::new)
        });
        Self { binding }
    }

    /// Starts the mount without observing it.
    pub fn preload(&self) {
        self.binding.preload();
    }

    /// Scheduler-facing read; `Pending` until the mount commits.
    pub fn read(&self) -> ReadOutcome<Arc<MapBinding>, MapError> {
        self.binding.read()
    }

    /// Awaits the mounted binding.
    pub async fn binding(&self) -> Result<Arc<MapBinding>, MapError> {
        self.binding.load().await
    }

    /// Fits the camera over `coordinates` once the mount is ready.
    pub async fn fit_bounds(
        &self,
        coordinates: &[LngLat],
        options: &FitBoundsOptions,
    ) -> Result<(), MapError> {
        let binding = self.binding.load().await?;
        binding.fit_bounds(coordinates, options);
        Ok(())
    }
}
