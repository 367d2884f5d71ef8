//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters implement these ports: on a real
//! device they wrap the platform's settings and location services, in tests
//! the controllable fakes in `crate::infrastructure::mocks` stand in.

use crate::domain::fix::LocationFix;
use std::fmt::Debug;
use std::time::{Duration, SystemTime};

/// Error reported by a platform adapter call.
///
/// Carries the human-readable cause the platform gave for refusing the
/// operation. The controller never interprets the message; it surfaces it
/// unchanged inside its own typed errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError {
    message: String,
}

impl PlatformError {
    /// Create an error with the given cause message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The cause message supplied by the adapter.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PlatformError {}

/// Power classification asserted for the synthetic provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerClass {
    /// Low power draw, what a GPS-class test provider reports
    Low,
    /// Moderate power draw
    Medium,
    /// High power draw
    High,
}

/// Accuracy classification asserted for the synthetic provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyClass {
    /// Fine-grained positioning (GPS-class)
    Fine,
    /// Coarse positioning (network-class)
    Coarse,
}

/// Capability flags asserted when registering the synthetic provider.
///
/// No network requirement and no altitude/speed/bearing support are asserted
/// at registration; those attributes are supplied per fix instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCapabilities {
    name: String,
    requires_network: bool,
    supports_altitude: bool,
    supports_speed: bool,
    supports_bearing: bool,
    power: PowerClass,
    accuracy: AccuracyClass,
}

impl ProviderCapabilities {
    /// GPS-class capabilities for a provider with the given identity:
    /// no requirements asserted, low power, fine accuracy.
    pub fn gps(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requires_network: false,
            supports_altitude: false,
            supports_speed: false,
            supports_bearing: false,
            power: PowerClass::Low,
            accuracy: AccuracyClass::Fine,
        }
    }

    /// The provider identity under which the platform lists this provider.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the provider claims to need network connectivity.
    pub fn requires_network(&self) -> bool {
        self.requires_network
    }

    /// Whether altitude support is asserted at registration.
    pub fn supports_altitude(&self) -> bool {
        self.supports_altitude
    }

    /// Whether speed support is asserted at registration.
    pub fn supports_speed(&self) -> bool {
        self.supports_speed
    }

    /// Whether bearing support is asserted at registration.
    pub fn supports_bearing(&self) -> bool {
        self.supports_bearing
    }

    /// Power classification reported to the platform.
    pub fn power(&self) -> PowerClass {
        self.power
    }

    /// Accuracy classification reported to the platform.
    pub fn accuracy(&self) -> AccuracyClass {
        self.accuracy
    }
}

/// Port for obtaining current time.
///
/// Fix stamping needs both clocks: wall time for the absolute timestamp
/// consumers display, and a monotonic marker for delta computations.
/// Infrastructure provides concrete implementations (SystemClock, MockClock).
pub trait Clock: Send + Sync + Debug {
    /// Current wall-clock time.
    fn wall_time(&self) -> SystemTime;

    /// Monotonic elapsed time since an arbitrary fixed origin.
    fn monotonic(&self) -> Duration;
}

/// Port for reading platform permission state.
///
/// Both queries are pure reads with no side effects. Adapters report read
/// failures (setting absent, permission denied) as `Err`; the controller
/// swallows those into `false` answers.
pub trait SettingsReader: Send + Sync + Debug {
    /// Whether the platform's development-settings flag is explicitly enabled.
    fn developer_mode_enabled(&self) -> Result<bool, PlatformError>;

    /// Identity of the application currently selected to supply mock
    /// locations, or `None` if no selection exists.
    fn selected_mock_app(&self) -> Result<Option<String>, PlatformError>;
}

/// Port for navigating to the platform's settings screens.
///
/// The screens themselves are opaque system UI; adapters only trigger the
/// navigation side effect.
pub trait SettingsNavigator: Send + Sync + Debug {
    /// Open the developer options screen.
    fn open_developer_options(&self) -> Result<(), PlatformError>;

    /// Open the screen where the mock location app is selected.
    fn open_mock_location_settings(&self) -> Result<(), PlatformError>;
}

/// Port for the platform's synthetic provider registry.
///
/// A sink manages exactly one provider slot, preserving the invariant that
/// one controller owns one provider identity. Five mutating operations
/// mirror the platform lifecycle (register, enable, push, disable, remove);
/// the two queries report platform-side state.
///
/// Operation ordering matters to the platform: a provider must be registered
/// before it can be enabled or pushed to, and must be disabled before it is
/// removed.
pub trait ProviderSink: Send + Sync + Debug {
    /// Register the synthetic provider with the given capabilities.
    fn register(&self, capabilities: &ProviderCapabilities) -> Result<(), PlatformError>;

    /// Enable the registered provider so consumers start reading from it.
    fn enable(&self) -> Result<(), PlatformError>;

    /// Push a fix as the provider's current location.
    fn push(&self, fix: &LocationFix) -> Result<(), PlatformError>;

    /// Disable the registered provider.
    fn disable(&self) -> Result<(), PlatformError>;

    /// Remove the provider from the platform's provider set.
    fn remove(&self) -> Result<(), PlatformError>;

    /// Whether the provider is currently among the platform's registered
    /// providers.
    fn is_registered(&self) -> Result<bool, PlatformError>;

    /// Whether the registered provider is currently enabled.
    fn is_enabled(&self) -> Result<bool, PlatformError>;
}
