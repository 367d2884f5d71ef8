//! # mock-location
//!
//! Lifecycle controller for injecting synthetic position fixes through a
//! platform mock location provider, gated by the platform's developer-mode
//! and mock-app permission checks.
//!
//! The crate owns the part of location mocking that has real invariants:
//! the provider registration is a singleton resource, enable/disable
//! ordering matters to the platform, and teardown must be idempotent and
//! run on every exit path. Everything platform-specific sits behind narrow
//! ports, so the state machine is fully testable without a device.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mock_location::infrastructure::mocks::{FakeProviderSink, FakeSettings};
//! use mock_location::{FixRequest, MockLocationController};
//! use std::sync::Arc;
//!
//! // On a real device these adapters wrap the platform's settings store and
//! // location service; the fakes stand in everywhere else.
//! let settings = Arc::new(FakeSettings::new());
//! settings.set_developer_mode(true);
//! settings.select_mock_app("com.example.app");
//! let sink = Arc::new(FakeProviderSink::new());
//!
//! let mut controller =
//!     MockLocationController::builder(settings, sink, "com.example.app").build()?;
//!
//! // First fix registers and enables the provider, then pushes.
//! controller.start(FixRequest::new(37.0, -122.0).with_accuracy(5.0))?;
//!
//! // Simulate movement with repeated injections; the caller controls cadence.
//! controller.inject_update(FixRequest::new(37.001, -122.0).with_speed(10.0))?;
//!
//! // Disable and remove the provider. Also happens automatically on drop.
//! controller.stop()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Preconditions
//!
//! Starting a session requires two platform gates, checked in order:
//! the developer-mode flag must be enabled
//! ([`StartError::DeveloperModeDisabled`]) and this application must be the
//! platform's selected mock location app ([`StartError::MockAppNotSelected`]).
//! The matching queries ([`MockLocationController::is_developer_mode_enabled`],
//! [`MockLocationController::is_mock_app_selected`]) never fail: a read
//! failure is reported as `false`, which is what a UI gating decision needs.
//! Nothing is retried internally; after the user flips a setting, the caller
//! retries `start`.
//!
//! ## Guaranteed teardown
//!
//! A dangling mock provider corrupts the platform's location state for other
//! consumers until manually cleared, so the controller treats teardown as a
//! scoped-resource contract: [`MockLocationController::stop`] disables then
//! removes the provider, is a successful no-op when nothing is registered,
//! and runs best-effort from `Drop` when a still-active controller goes out
//! of scope. The local active flag is cleared on every teardown attempt even
//! if the platform calls fail, so a failed stop never wedges the controller.
//!
//! ## Channel surface
//!
//! External front ends talk to the controller through
//! [`MockLocationService`], a synchronous name-based dispatcher
//! (`startMocking`, `stopMocking`, the three boolean queries, and the two
//! settings-screen side effects). Errors carry stable SCREAMING_SNAKE codes;
//! unknown method names are rejected with `NOT_IMPLEMENTED` rather than
//! silently ignored.
//!
//! ## Feature Flags
//!
//! - `test-helpers`: exposes `infrastructure::mocks` (controllable fakes for
//!   every port) to downstream crates. The fakes are always available to this
//!   crate's own tests.

// Domain layer - pure business logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::fix::{
    FixError, FixRequest, FixTimestamp, LocationFix, DEFAULT_ACCURACY_METERS,
};

pub use application::{
    controller::{
        BuildError, MockLocationController, MockLocationControllerBuilder, StartError, StopError,
        DEFAULT_PROVIDER_NAME,
    },
    ports::{
        AccuracyClass, Clock, PlatformError, PowerClass, ProviderCapabilities, ProviderSink,
        SettingsNavigator, SettingsReader,
    },
};

pub use infrastructure::{
    channel::{DispatchError, MethodCall, MockLocationService, Reply},
    clock::SystemClock,
};
