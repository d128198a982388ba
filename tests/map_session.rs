use std::sync::Arc;
use std::time::{Duration, Instant};

use mapbind::lifecycle::MapSession;
use mapbind::map::mock::{MockSceneFactory, MockWidgetFactory, WidgetCall};
use mapbind::map::{FitBoundsOptions, LngLat, MapConfig, MapError, MapEvent};
use mapbind::ReadOutcome;

/// Full end-to-end path: the session mounts once, strips the label layers
/// when the style loads, and replays the same binding to later callers.
#[tokio::test]
async fn session_mounts_once_and_strips_labels() {
    let widgets = Arc::new(MockWidgetFactory::new().with_style_layers([
        "water",
        "road-label",
        "poi-label",
        "building",
    ]));
    let scenes = Arc::new(MockSceneFactory::new());
    let session = MapSession::new(widgets.clone(), scenes, MapConfig::default());

    let binding = session.binding().await.unwrap();
    let widget = widgets.last_widget().unwrap();
    widget.fire(MapEvent::Load);
    assert_eq!(
        widget.layer_ids(),
        vec!["water".to_string(), "building".to_string()]
    );

    // A second access reuses the mounted binding.
    let again = session.binding().await.unwrap();
    assert!(Arc::ptr_eq(&binding, &again));
}

/// The scheduler-facing read stays pending while the mount is held open,
/// and flips to ready once it commits.
#[tokio::test]
async fn read_stays_pending_until_the_mount_commits() {
    let widgets = Arc::new(MockWidgetFactory::new().gated());
    let scenes = Arc::new(MockSceneFactory::new());
    let session = MapSession::new(widgets.clone(), scenes, MapConfig::default());

    session.preload();
    let ReadOutcome::Pending(handle) = session.read() else {
        panic!("read must suspend while the mount is gated");
    };

    widgets.release();
    handle.settled().await;
    assert!(matches!(session.read(), ReadOutcome::Ready(_)));
}

/// A failed mount becomes a rejection that every later access replays.
#[tokio::test]
async fn failed_mount_is_replayed_as_the_same_error() {
    let widgets = Arc::new(
        MockWidgetFactory::new().failing(MapError::WidgetCreation("no container".into())),
    );
    let scenes = Arc::new(MockSceneFactory::new());
    let session = MapSession::new(widgets, scenes, MapConfig::default());

    let Err(first) = session.binding().await else {
        panic!("mount must fail");
    };
    let Err(second) = session.binding().await else {
        panic!("failure must be replayed");
    };
    assert_eq!(first, MapError::WidgetCreation("no container".into()));
    assert_eq!(first, second);
}

/// The fit convenience waits for the mount and forwards the default
/// padding to the widget.
#[tokio::test]
async fn fit_bounds_reaches_the_widget_with_default_padding() {
    let widgets = Arc::new(MockWidgetFactory::new().with_style_layers(["water"]));
    let scenes = Arc::new(MockSceneFactory::new());
    let session = MapSession::new(widgets.clone(), scenes, MapConfig::default());

    let coords = [
        LngLat::new(114.0, 22.6),
        LngLat::new(114.2, 22.8),
        LngLat::new(113.9, 22.75),
    ];
    session
        .fit_bounds(&coords, &FitBoundsOptions::default())
        .await
        .unwrap();

    let widget = widgets.last_widget().unwrap();
    let calls = widget.calls();
    let Some(WidgetCall::FitBounds { bounds, padding }) = calls.last() else {
        panic!("expected a fit_bounds call, got {calls:?}");
    };
    assert_eq!(bounds.southwest(), LngLat::new(113.9, 22.6));
    assert_eq!(bounds.northeast(), LngLat::new(114.2, 22.8));
    assert_eq!(*padding, 50);
}

/// Releasing the session and the binding tears the widget and scene down.
#[tokio::test]
async fn dropping_the_session_tears_the_binding_down() {
    let widgets = Arc::new(MockWidgetFactory::new().with_style_layers(["water"]));
    let scenes = Arc::new(MockSceneFactory::new());
    let session = MapSession::new(widgets.clone(), scenes.clone(), MapConfig::default());

    let binding = session.binding().await.unwrap();
    let widget = widgets.last_widget().unwrap();
    let scene = scenes.last_scene().unwrap();

    drop(binding);
    drop(session);

    assert!(widget.removed());
    assert!(scene.destroyed());
}

/// A mount in flight when the session is dropped is not cancelled: it
/// completes, and the binding is torn down with its last owner.
#[tokio::test]
async fn a_mount_in_flight_outlives_the_session_and_still_tears_down() {
    let widgets = Arc::new(MockWidgetFactory::new().gated());
    let scenes = Arc::new(MockSceneFactory::new());
    let session = MapSession::new(widgets.clone(), scenes, MapConfig::default());

    session.preload();
    drop(session);
    widgets.release();

    // The spawned mount finishes on its own; once the settled cell (the
    // binding's last owner) is gone, the widget must have been released.
    let deadline = Instant::now() + Duration::from_secs(1);
    loop {
        if widgets.last_widget().is_some_and(|widget| widget.removed()) {
            break;
        }
        assert!(Instant::now() < deadline, "widget was never torn down");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
