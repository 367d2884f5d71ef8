//! Demo: simulate driving a short route by injecting fixes.
//!
//! Runs against the in-memory fakes so it works on any machine; on a real
//! device the same controller would be wired to platform adapters instead.

use mock_location::infrastructure::mocks::{FakeProviderSink, FakeSettings};
use mock_location::{FixRequest, MockLocationController};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    // Pretend the user already flipped both platform gates.
    let settings = Arc::new(FakeSettings::new());
    settings.set_developer_mode(true);
    settings.select_mock_app("com.example.mockgps");
    let sink = Arc::new(FakeProviderSink::new());

    let mut controller =
        MockLocationController::builder(settings, sink.clone(), "com.example.mockgps").build()?;

    println!("=== Route Simulation ===\n");

    // A short drive north along a street in San Francisco.
    let route = [
        (37.7749, -122.4194),
        (37.7753, -122.4194),
        (37.7757, -122.4195),
        (37.7761, -122.4195),
        (37.7765, -122.4196),
    ];

    controller.start(
        FixRequest::new(route[0].0, route[0].1)
            .with_accuracy(5.0)
            .with_heading(0.0),
    )?;
    println!("session started at {:?}", route[0]);

    for (lat, lon) in &route[1..] {
        controller.inject_update(
            FixRequest::new(*lat, *lon)
                .with_accuracy(5.0)
                .with_speed(12.0)
                .with_heading(355.0),
        )?;
        println!("injected fix at ({lat}, {lon})");
    }

    println!("\nplatform observed {} fixes:", sink.push_count());
    for fix in sink.pushed() {
        println!(
            "  lat={:.4} lon={:.4} speed={:.1} m/s heading={:.0}°",
            fix.latitude, fix.longitude, fix.speed, fix.heading
        );
    }

    controller.stop()?;
    println!("\nsession stopped; provider registered = {}", sink.registered());
    Ok(())
}
