//! Demo: how the channel surface reports precondition failures and guides
//! the user toward the settings screens.

use mock_location::infrastructure::mocks::{FakeNavigator, FakeProviderSink, FakeSettings};
use mock_location::{MethodCall, MockLocationController, MockLocationService, Reply};
use serde_json::json;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let settings = Arc::new(FakeSettings::new());
    let sink = Arc::new(FakeProviderSink::new());
    let navigator = Arc::new(FakeNavigator::new());
    let controller =
        MockLocationController::builder(settings.clone(), sink, "com.example.mockgps").build()?;
    let mut service = MockLocationService::new(controller, navigator);

    let start = MethodCall::with_arguments(
        "startMocking",
        json!({"latitude": 48.8566, "longitude": 2.3522}),
    );

    println!("=== Precondition Walkthrough ===\n");

    // Fresh device: developer mode is off.
    match service.handle(&start) {
        Err(e) => println!("start refused: [{}] {}", e.code(), e),
        Ok(_) => unreachable!("preconditions not satisfied yet"),
    }
    // A front end would now route the user to the settings screen.
    service.handle(&MethodCall::new("openDeveloperOptions"))?;
    settings.set_developer_mode(true);
    println!("developer mode enabled\n");

    // Developer mode on, but another app holds the mock-location slot.
    settings.select_mock_app("com.other.app");
    match service.handle(&start) {
        Err(e) => println!("start refused: [{}] {}", e.code(), e),
        Ok(_) => unreachable!("wrong app is selected"),
    }
    service.handle(&MethodCall::new("openMockLocationSettings"))?;
    settings.select_mock_app("com.example.mockgps");
    println!("mock location app selected\n");

    // Both gates open: the session starts.
    service.handle(&start)?;
    let enabled = service.handle(&MethodCall::new("isMockLocationEnabled"))?;
    println!("mocking active: {}", matches!(enabled, Reply::Bool(true)));

    service.handle(&MethodCall::new("stopMocking"))?;
    println!("session stopped");
    Ok(())
}
