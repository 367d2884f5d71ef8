//! End-to-end lifecycle scenarios driven through the public API.

use mock_location::infrastructure::mocks::{FakeProviderSink, FakeSettings};
use mock_location::{FixRequest, MockLocationController, StartError};
use std::sync::Arc;

fn ready_settings() -> Arc<FakeSettings> {
    let settings = Arc::new(FakeSettings::new());
    settings.set_developer_mode(true);
    settings.select_mock_app("com.example.mockgps");
    settings
}

fn build(settings: Arc<FakeSettings>, sink: Arc<FakeProviderSink>) -> MockLocationController {
    MockLocationController::builder(settings, sink, "com.example.mockgps")
        .build()
        .unwrap()
}

#[test]
fn full_session_observed_at_the_platform() {
    let sink = Arc::new(FakeProviderSink::new());
    let mut controller = build(ready_settings(), sink.clone());

    controller
        .start(
            FixRequest::new(37.0, -122.0)
                .with_accuracy(5.0)
                .with_speed(10.0),
        )
        .unwrap();

    // Platform subscribers observe the fix as if from a real GPS provider.
    assert!(controller.is_mock_location_active());
    let fix = sink.last_fix().unwrap();
    assert_eq!(fix.latitude, 37.0);
    assert_eq!(fix.longitude, -122.0);
    assert_eq!(fix.accuracy, 5.0);
    assert_eq!(fix.speed, 10.0);
    assert_eq!(fix.altitude, 0.0);
    assert_eq!(fix.heading, 0.0);

    controller.stop().unwrap();
    assert!(!controller.is_mock_location_active());
}

#[test]
fn movement_simulation_pushes_every_fix() {
    let sink = Arc::new(FakeProviderSink::new());
    let mut controller = build(ready_settings(), sink.clone());

    controller.start(FixRequest::new(52.5200, 13.4050)).unwrap();
    let route = [
        (52.5201, 13.4052),
        (52.5203, 13.4055),
        (52.5206, 13.4059),
    ];
    for (lat, lon) in route {
        controller
            .inject_update(FixRequest::new(lat, lon).with_speed(8.0).with_heading(45.0))
            .unwrap();
    }

    let pushed = sink.pushed();
    assert_eq!(pushed.len(), 4);
    assert_eq!(pushed[3].latitude, 52.5206);
    assert_eq!(pushed[3].heading, 45.0);
    // The provider was registered exactly once for the whole session.
    assert_eq!(sink.register_count(), 1);
}

#[test]
fn developer_mode_gate_blocks_before_any_platform_call() {
    let settings = Arc::new(FakeSettings::new());
    settings.select_mock_app("com.example.mockgps");
    let sink = Arc::new(FakeProviderSink::new());
    let mut controller = build(settings, sink.clone());

    let err = controller.start(FixRequest::new(37.0, -122.0)).unwrap_err();

    assert_eq!(err, StartError::DeveloperModeDisabled);
    assert!(!sink.registered());
    assert!(!controller.is_active());
}

#[test]
fn losing_mock_app_privilege_blocks_the_next_start() {
    let settings = ready_settings();
    let sink = Arc::new(FakeProviderSink::new());
    let mut controller = build(settings.clone(), sink.clone());

    controller.start(FixRequest::new(37.0, -122.0)).unwrap();
    controller.stop().unwrap();

    // The user picks a different mock app between sessions.
    settings.select_mock_app("com.other.app");
    let err = controller.start(FixRequest::new(37.0, -122.0)).unwrap_err();
    assert_eq!(err, StartError::MockAppNotSelected);
}

#[test]
fn stop_is_idempotent_and_safe_before_start() {
    let sink = Arc::new(FakeProviderSink::new());
    let mut controller = build(ready_settings(), sink.clone());

    // Never started: success, no platform mutations.
    controller.stop().unwrap();
    assert_eq!(sink.disable_count(), 0);

    controller.start(FixRequest::new(1.0, 1.0)).unwrap();
    controller.stop().unwrap();
    controller.stop().unwrap();

    // Second stop saw nothing registered and changed nothing.
    assert_eq!(sink.disable_count(), 1);
    assert_eq!(sink.remove_count(), 1);
}

#[test]
fn partial_stop_failure_never_wedges_the_controller() {
    let sink = Arc::new(FakeProviderSink::new());
    let mut controller = build(ready_settings(), sink.clone());

    controller.start(FixRequest::new(37.0, -122.0)).unwrap();
    sink.fail_remove(true);

    assert!(controller.stop().is_err());
    // Local state reflects "not active" even though removal failed.
    assert!(!controller.is_active());

    // Once the platform recovers, a fresh session starts cleanly.
    sink.fail_remove(false);
    controller.start(FixRequest::new(38.0, -121.0)).unwrap();
    assert!(controller.is_active());
    controller.stop().unwrap();
    assert!(!sink.registered());
}

#[test]
fn dropping_an_active_controller_removes_the_provider() {
    let sink = Arc::new(FakeProviderSink::new());
    {
        let mut controller = build(ready_settings(), sink.clone());
        controller.start(FixRequest::new(37.0, -122.0)).unwrap();
        assert!(sink.registered());
        // Dropped without an explicit stop.
    }

    assert!(!sink.registered());
    assert!(!sink.enabled());
}

#[test]
fn inject_after_stop_is_rejected() {
    let sink = Arc::new(FakeProviderSink::new());
    let mut controller = build(ready_settings(), sink.clone());

    controller.start(FixRequest::new(37.0, -122.0)).unwrap();
    controller.stop().unwrap();

    let err = controller
        .inject_update(FixRequest::new(37.1, -122.1))
        .unwrap_err();
    assert_eq!(err, StartError::NotActive);
    assert_eq!(sink.push_count(), 1);
}
