//! # Mock Widgets & Scenes
//!
//! Recording fakes for the widget and scene capabilities.
//!
//! [`MockWidget`] records every capability call and lets tests fire events
//! by hand, so the label-stripping and teardown glue can be exercised
//! without a real map library. [`MockWidgetFactory`] can additionally be
//! gated (mounts stay in flight until the test releases them) or made to
//! fail, which is how the suspense paths are pinned in their pending and
//! rejected states.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::map::error::MapError;
use crate::map::types::{FitBoundsOptions, LngLatBounds, MapConfig, MapEvent};
use crate::map::widget::{
    EventCallback, MapWidget, OverlayScene, SceneFactory, WidgetFactory,
};

/// A call recorded by [`MockWidget`].
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetCall {
    RemoveLayer(String),
    FitBounds { bounds: LngLatBounds, padding: u32 },
    Remove,
}

/// An in-memory widget that records every capability call.
#[derive(Clone)]
pub struct MockWidget {
    state: Arc<WidgetState>,
}

struct WidgetState {
    layers: Mutex<Vec<String>>,
    callbacks: Mutex<Vec<(MapEvent, EventCallback)>>,
    calls: Mutex<Vec<WidgetCall>>,
    removed: AtomicBool,
}

impl MockWidget {
    pub fn new(layers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            state: Arc::new(WidgetState {
                layers: Mutex::new(layers.into_iter().map(Into::into).collect()),
                callbacks: Mutex::new(Vec::new()),
                calls: Mutex::new(Vec::new()),
                removed: AtomicBool::new(false),
            }),
        }
    }

    /// Fires `event`, invoking every callback subscribed to it.
    pub fn fire(&self, event: MapEvent) {
        let callbacks = std::mem::take(&mut *self.state.callbacks.lock().unwrap());
        for (subscribed, callback) in &callbacks {
            if *subscribed == event {
                callback(self);
            }
        }
        self.state.callbacks.lock().unwrap().extend(callbacks);
    }

    /// Layer ids still present on the widget.
    pub fn layer_ids(&self) -> Vec<String> {
        self.state.layers.lock().unwrap().clone()
    }

    /// Everything recorded so far.
    pub fn calls(&self) -> Vec<WidgetCall> {
        self.state.calls.lock().unwrap().clone()
    }

    /// Whether [`MapWidget::remove`] was called.
    pub fn removed(&self) -> bool {
        self.state.removed.load(Ordering::SeqCst)
    }
}

impl MapWidget for MockWidget {
    fn on(&self, event: MapEvent, callback: EventCallback) {
        self.state.callbacks.lock().unwrap().push((event, callback));
    }

    fn style_layers(&self) -> Vec<String> {
        self.layer_ids()
    }

    fn remove_layer(&self, layer_id: &str) -> Result<(), MapError> {
        let mut layers = self.state.layers.lock().unwrap();
        let Some(position) = layers.iter().position(|id| id == layer_id) else {
            return Err(MapError::UnknownLayer(layer_id.to_string()));
        };
        layers.remove(position);
        drop(layers);
        self.state
            .calls
            .lock()
            .unwrap()
            .push(WidgetCall::RemoveLayer(layer_id.to_string()));
        Ok(())
    }

    fn fit_bounds(&self, bounds: LngLatBounds, options: &FitBoundsOptions) {
        self.state.calls.lock().unwrap().push(WidgetCall::FitBounds {
            bounds,
            padding: options.padding,
        });
    }

    fn remove(&self) {
        self.state.removed.store(true, Ordering::SeqCst);
        self.state.calls.lock().unwrap().push(WidgetCall::Remove);
    }
}

/// An overlay scene that records its destruction.
#[derive(Clone)]
pub struct MockScene {
    destroyed: Arc<AtomicBool>,
}

impl MockScene {
    fn new() -> Self {
        Self {
            destroyed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether [`OverlayScene::destroy`] was called.
    pub fn destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }
}

impl OverlayScene for MockScene {
    fn destroy(&self) {
        self.destroyed.store(true, Ordering::SeqCst);
    }
}

/// Factory producing [`MockWidget`]s.
pub struct MockWidgetFactory {
    style_layers: Vec<String>,
    created: Mutex<Vec<MockWidget>>,
    gate: Option<Arc<Notify>>,
    failure: Option<MapError>,
}

impl MockWidgetFactory {
    pub fn new() -> Self {
        Self {
            style_layers: Vec::new(),
            created: Mutex::new(Vec::new()),
            gate: None,
            failure: None,
        }
    }

    /// Style layers every created widget starts with.
    pub fn with_style_layers(
        mut self,
        layers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.style_layers = layers.into_iter().map(Into::into).collect();
        self
    }

    /// Holds each `create` call until [`release`](Self::release) lets it
    /// through.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    /// Makes every `create` call fail with `error`.
    pub fn failing(mut self, error: MapError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Lets one gated `create` call proceed (pending or future).
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// The most recently created widget.
    pub fn last_widget(&self) -> Option<MockWidget> {
        self.created.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl WidgetFactory for MockWidgetFactory {
    async fn create(&self, _config: &MapConfig) -> Result<Box<dyn MapWidget>, MapError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        let widget = MockWidget::new(self.style_layers.iter().cloned());
        self.created.lock().unwrap().push(widget.clone());
        Ok(Box::new(widget))
    }
}

/// Factory producing [`MockScene`]s.
pub struct MockSceneFactory {
    attached: Mutex<Vec<MockScene>>,
}

impl MockSceneFactory {
    pub fn new() -> Self {
        Self {
            attached: Mutex::new(Vec::new()),
        }
    }

    /// The most recently attached scene.
    pub fn last_scene(&self) -> Option<MockScene> {
        self.attached.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SceneFactory for MockSceneFactory {
    async fn attach(&self, _widget: &dyn MapWidget) -> Result<Box<dyn OverlayScene>, MapError> {
        let scene = MockScene::new();
        self.attached.lock().unwrap().push(scene.clone());
        Ok(Box::new(scene))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_widget_records_layer_removal() {
        let widget = MockWidget::new(["water", "road-label"]);
        widget.remove_layer("road-label").unwrap();

        assert_eq!(widget.layer_ids(), vec!["water".to_string()]);
        assert_eq!(
            widget.calls(),
            vec![WidgetCall::RemoveLayer("road-label".to_string())]
        );
        assert_eq!(
            widget.remove_layer("road-label"),
            Err(MapError::UnknownLayer("road-label".to_string()))
        );
    }

    #[tokio::test]
    async fn fired_events_invoke_their_subscribers() {
        let widget = MockWidget::new(["water"]);
        let fired = Arc::new(AtomicBool::new(false));
        let seen = Arc::clone(&fired);
        widget.on(
            MapEvent::Load,
            Box::new(move |_| seen.store(true, Ordering::SeqCst)),
        );

        widget.fire(MapEvent::Load);
        assert!(fired.load(Ordering::SeqCst));
    }
}
