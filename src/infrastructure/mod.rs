//! Infrastructure layer - external adapters and integrations.
//!
//! This layer provides adapters for:
//! - Clock abstraction (system time vs mock)
//! - The request/response channel consumed by the command layer
//!
//! Adapters for a real device platform (settings store, provider registry,
//! settings screens) live with the embedding application; this crate ships
//! the ports plus controllable fakes.

pub mod channel;
pub mod clock;

/// Mock implementations for testing.
///
/// This module is only available when the `test-helpers` feature is enabled,
/// or during test builds. It provides controllable test doubles for the
/// platform-facing ports.
///
/// To use these mocks in integration tests, add to your `Cargo.toml`:
/// ```toml
/// [dev-dependencies]
/// mock-location = { version = "*", features = ["test-helpers"] }
/// ```
#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;
