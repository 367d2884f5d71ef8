//! Mock location lifecycle controller.
//!
//! The controller owns the registration state of the synthetic provider:
//! it validates permission preconditions, registers and enables the provider,
//! injects fix updates, and guarantees teardown on every exit path, including
//! being dropped while a session is still active.

use crate::application::ports::{
    Clock, PlatformError, ProviderCapabilities, ProviderSink, SettingsReader,
};
use crate::domain::fix::{FixError, FixRequest, FixTimestamp, LocationFix};
use crate::infrastructure::clock::SystemClock;
use std::sync::Arc;
use std::time::UNIX_EPOCH;

/// Error returned when starting or updating a mock session fails.
#[derive(Debug, Clone, PartialEq)]
pub enum StartError {
    /// The platform's developer mode flag is not enabled
    DeveloperModeDisabled,
    /// This application is not selected as the platform's mock location app
    MockAppNotSelected,
    /// The supplied fix carries an invalid value
    InvalidFix(FixError),
    /// A platform call failed while registering, enabling, or pushing
    Mocking(PlatformError),
    /// An update was injected while no session is active
    NotActive,
}

impl std::fmt::Display for StartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartError::DeveloperModeDisabled => {
                write!(f, "developer mode is not enabled")
            }
            StartError::MockAppNotSelected => {
                write!(f, "this app is not selected as the mock location app")
            }
            StartError::InvalidFix(e) => write!(f, "invalid fix: {}", e),
            StartError::Mocking(e) => write!(f, "failed to start mocking: {}", e),
            StartError::NotActive => write!(f, "mock location session is not active"),
        }
    }
}

impl std::error::Error for StartError {}

impl From<FixError> for StartError {
    fn from(e: FixError) -> Self {
        StartError::InvalidFix(e)
    }
}

/// Error returned when stopping a mock session fails.
///
/// Even when this error is returned, the controller's local state has been
/// reset to inactive; a subsequent `start` is not blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopError {
    /// A platform call failed while disabling or removing the provider
    StopMocking(PlatformError),
}

impl std::fmt::Display for StopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopError::StopMocking(e) => write!(f, "failed to stop mocking: {}", e),
        }
    }
}

impl std::error::Error for StopError {}

impl From<PlatformError> for StopError {
    fn from(e: PlatformError) -> Self {
        StopError::StopMocking(e)
    }
}

/// Error returned when building a `MockLocationController` fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The provider identity must not be empty
    EmptyProviderName,
    /// The application identity must not be empty
    EmptyAppIdentity,
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::EmptyProviderName => {
                write!(f, "provider name must not be empty")
            }
            BuildError::EmptyAppIdentity => {
                write!(f, "app identity must not be empty")
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Builder for constructing a [`MockLocationController`].
pub struct MockLocationControllerBuilder {
    settings: Arc<dyn SettingsReader>,
    sink: Arc<dyn ProviderSink>,
    app_identity: String,
    clock: Option<Arc<dyn Clock>>,
    capabilities: Option<ProviderCapabilities>,
}

impl MockLocationControllerBuilder {
    /// Set a custom clock (mainly for testing).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the capabilities the provider is registered with.
    ///
    /// Default: [`ProviderCapabilities::gps`] under the identity `"gps"`.
    pub fn with_capabilities(mut self, capabilities: ProviderCapabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Build the controller.
    ///
    /// # Errors
    /// Returns `BuildError` if the provider or app identity is empty.
    pub fn build(self) -> Result<MockLocationController, BuildError> {
        if self.app_identity.is_empty() {
            return Err(BuildError::EmptyAppIdentity);
        }
        let capabilities = self
            .capabilities
            .unwrap_or_else(|| ProviderCapabilities::gps(DEFAULT_PROVIDER_NAME));
        if capabilities.name().is_empty() {
            return Err(BuildError::EmptyProviderName);
        }
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));

        Ok(MockLocationController {
            settings: self.settings,
            sink: self.sink,
            clock,
            capabilities,
            app_identity: self.app_identity,
            active: false,
        })
    }
}

/// Provider identity used when none is configured.
pub const DEFAULT_PROVIDER_NAME: &str = "gps";

/// Lifecycle controller for a synthetic location provider.
///
/// Exactly one provider identity is managed per controller instance. A
/// session becomes active on the first successful [`start`](Self::start),
/// accepts repeated [`inject_update`](Self::inject_update) calls while
/// active, and ends on [`stop`](Self::stop) or when the controller is
/// dropped.
///
/// Mutating operations take `&mut self`; callers are responsible for not
/// overlapping them (single-writer discipline, enforced here by the borrow
/// checker).
///
/// # Example
///
/// ```no_run
/// use mock_location::infrastructure::mocks::{FakeProviderSink, FakeSettings};
/// use mock_location::{FixRequest, MockLocationController};
/// use std::sync::Arc;
///
/// let settings = Arc::new(FakeSettings::new());
/// settings.set_developer_mode(true);
/// settings.select_mock_app("com.example.app");
/// let sink = Arc::new(FakeProviderSink::new());
///
/// let mut controller =
///     MockLocationController::builder(settings, sink, "com.example.app")
///         .build()
///         .unwrap();
///
/// controller.start(FixRequest::new(37.0, -122.0))?;
/// controller.inject_update(FixRequest::new(37.001, -122.0).with_speed(10.0))?;
/// controller.stop()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct MockLocationController {
    settings: Arc<dyn SettingsReader>,
    sink: Arc<dyn ProviderSink>,
    clock: Arc<dyn Clock>,
    capabilities: ProviderCapabilities,
    app_identity: String,
    active: bool,
}

impl MockLocationController {
    /// Create a builder over the given platform collaborators.
    ///
    /// # Arguments
    /// * `settings` - Reader for the platform's permission state
    /// * `sink` - The platform's synthetic provider registry
    /// * `app_identity` - This application's identity, compared against the
    ///   platform's mock-app selection
    pub fn builder(
        settings: Arc<dyn SettingsReader>,
        sink: Arc<dyn ProviderSink>,
        app_identity: impl Into<String>,
    ) -> MockLocationControllerBuilder {
        MockLocationControllerBuilder {
            settings,
            sink,
            app_identity: app_identity.into(),
            clock: None,
            capabilities: None,
        }
    }

    /// Whether the platform's developer mode flag is explicitly enabled.
    ///
    /// Read failures yield `false`, never an error.
    pub fn is_developer_mode_enabled(&self) -> bool {
        self.settings.developer_mode_enabled().unwrap_or(false)
    }

    /// Whether this application is the platform's selected mock location app.
    ///
    /// True only if the platform's selection exactly equals this controller's
    /// configured identity. Read failures yield `false`.
    pub fn is_mock_app_selected(&self) -> bool {
        match self.settings.selected_mock_app() {
            Ok(Some(selected)) => selected == self.app_identity,
            Ok(None) | Err(_) => false,
        }
    }

    /// Whether the synthetic provider is both registered and enabled at the
    /// platform level.
    ///
    /// Read failures yield `false`.
    pub fn is_mock_location_active(&self) -> bool {
        self.sink.is_registered().unwrap_or(false) && self.sink.is_enabled().unwrap_or(false)
    }

    /// Whether this controller currently holds an active session.
    ///
    /// This is the controller's local view; it is reconciled to `false` on
    /// every teardown attempt regardless of platform-call outcomes.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The capabilities the provider is (or will be) registered with.
    pub fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    /// Start a mock session and push the first fix.
    ///
    /// Preconditions are checked in order, short-circuiting on the first
    /// failure: developer mode must be enabled, then this app must be the
    /// selected mock location app. The provider is registered only if the
    /// platform does not already list it, then enabled, then the fix is
    /// stamped and pushed.
    ///
    /// Calling `start` again on an active session does not duplicate the
    /// registration; it re-enables the provider and pushes the new fix.
    ///
    /// # Errors
    /// * `DeveloperModeDisabled` / `MockAppNotSelected` on precondition
    ///   failure, before any platform mutation
    /// * `InvalidFix` if the request carries an invalid value
    /// * `Mocking` if a platform call fails; the session is left inactive
    pub fn start(&mut self, request: FixRequest) -> Result<(), StartError> {
        if !self.is_developer_mode_enabled() {
            return Err(StartError::DeveloperModeDisabled);
        }
        if !self.is_mock_app_selected() {
            return Err(StartError::MockAppNotSelected);
        }

        let fix = request.resolve(self.stamp())?;

        match self.establish(&fix) {
            Ok(()) => {
                self.active = true;
                tracing::debug!(
                    provider = %self.capabilities.name(),
                    latitude = fix.latitude,
                    longitude = fix.longitude,
                    "mock location session started"
                );
                Ok(())
            }
            Err(e) => {
                // Never report a half-registered provider as active.
                self.active = false;
                Err(StartError::Mocking(e))
            }
        }
    }

    /// Push another fix into the active session.
    ///
    /// Valid only while a session is active; intended for repeated calls
    /// simulating movement. No rate limit is imposed here; the caller
    /// controls cadence.
    ///
    /// # Errors
    /// * `NotActive` if no session is active; nothing reaches the platform
    /// * `InvalidFix` if the request carries an invalid value
    /// * `Mocking` if the platform rejects the push
    pub fn inject_update(&mut self, request: FixRequest) -> Result<(), StartError> {
        if !self.active {
            return Err(StartError::NotActive);
        }

        let fix = request.resolve(self.stamp())?;
        self.sink.push(&fix).map_err(StartError::Mocking)?;
        tracing::trace!(
            latitude = fix.latitude,
            longitude = fix.longitude,
            speed = fix.speed,
            "mock fix injected"
        );
        Ok(())
    }

    /// Stop the mock session and tear the provider down.
    ///
    /// If the provider is registered it is disabled and then removed, in
    /// that order. Idempotent: with nothing registered this is a successful
    /// no-op. The local active flag is cleared unconditionally, even when
    /// the underlying platform calls fail, so a failed stop never blocks a
    /// future `start`.
    ///
    /// # Errors
    /// Returns `StopMocking` with the platform's cause on partial failure.
    pub fn stop(&mut self) -> Result<(), StopError> {
        let result = self.teardown();
        self.active = false;
        match result {
            Ok(()) => {
                tracing::debug!(
                    provider = %self.capabilities.name(),
                    "mock location session stopped"
                );
                Ok(())
            }
            Err(e) => Err(StopError::StopMocking(e)),
        }
    }

    fn establish(&self, fix: &LocationFix) -> Result<(), PlatformError> {
        if !self.sink.is_registered()? {
            self.sink.register(&self.capabilities)?;
        }
        self.sink.enable()?;
        self.sink.push(fix)
    }

    fn teardown(&self) -> Result<(), PlatformError> {
        // Disable before remove; removing an enabled provider is undefined
        // on some platform implementations.
        if self.sink.is_registered()? {
            self.sink.disable()?;
            self.sink.remove()?;
        }
        Ok(())
    }

    fn stamp(&self) -> FixTimestamp {
        let epoch_millis = self
            .clock
            .wall_time()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        FixTimestamp {
            epoch_millis,
            elapsed: self.clock.monotonic(),
        }
    }
}

impl Drop for MockLocationController {
    /// Best-effort teardown: a dangling mock provider corrupts the
    /// platform's location state for other consumers until manually cleared.
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = self.stop() {
                tracing::warn!(
                    error = %e,
                    provider = %self.capabilities.name(),
                    "failed to tear down mock provider on drop"
                );
            }
        }
    }
}

impl std::fmt::Debug for MockLocationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockLocationController")
            .field("provider", &self.capabilities.name())
            .field("app_identity", &self.app_identity)
            .field("active", &self.active)
            .finish()
    }
}
