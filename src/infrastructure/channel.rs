//! Synchronous request/response surface for an external command layer.
//!
//! A front end (UI, RPC bridge, method channel) submits a [`MethodCall`] by
//! name with JSON arguments; [`MockLocationService`] dispatches it to the
//! controller or the settings navigator and answers with a [`Reply`] or a
//! [`DispatchError`] carrying a stable error code. Unrecognized method names
//! are rejected explicitly, never silently ignored.

use crate::application::controller::{MockLocationController, StartError, StopError};
use crate::application::ports::{PlatformError, SettingsNavigator};
use crate::domain::fix::FixRequest;
use std::sync::Arc;

/// One request from the command layer: a method name plus JSON arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    method: String,
    arguments: serde_json::Value,
}

impl MethodCall {
    /// Create a call with no arguments.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: serde_json::Value::Null,
        }
    }

    /// Create a call carrying JSON arguments.
    pub fn with_arguments(method: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// The method name.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The argument payload.
    pub fn arguments(&self) -> &serde_json::Value {
        &self.arguments
    }
}

/// Successful dispatch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// The operation completed and has no value to return
    Null,
    /// A boolean query result
    Bool(bool),
}

/// Error returned when dispatching a method call fails.
///
/// Every variant maps to a stable SCREAMING_SNAKE code via
/// [`code`](Self::code) so the command layer can switch on it without
/// parsing messages.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// The method name is not part of the surface
    NotImplemented(String),
    /// The arguments could not be decoded for the method
    InvalidArguments(String),
    /// Starting or updating the mock session failed
    Start(StartError),
    /// Stopping the mock session failed
    Stop(StopError),
    /// Navigating to a settings screen failed
    Settings(PlatformError),
}

impl DispatchError {
    /// Stable error code for the command layer.
    pub fn code(&self) -> &'static str {
        match self {
            DispatchError::NotImplemented(_) => "NOT_IMPLEMENTED",
            DispatchError::InvalidArguments(_) => "INVALID_ARGUMENTS",
            DispatchError::Start(StartError::DeveloperModeDisabled) => "DEVELOPER_MODE_DISABLED",
            DispatchError::Start(StartError::MockAppNotSelected) => "MOCK_APP_NOT_SELECTED",
            DispatchError::Start(StartError::InvalidFix(_)) => "INVALID_FIX",
            DispatchError::Start(StartError::Mocking(_)) => "MOCKING_FAILED",
            DispatchError::Start(StartError::NotActive) => "NOT_ACTIVE",
            DispatchError::Stop(StopError::StopMocking(_)) => "STOP_MOCKING_FAILED",
            DispatchError::Settings(_) => "SETTINGS_FAILED",
        }
    }
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::NotImplemented(method) => {
                write!(f, "method '{}' is not implemented", method)
            }
            DispatchError::InvalidArguments(cause) => {
                write!(f, "invalid arguments: {}", cause)
            }
            DispatchError::Start(e) => write!(f, "{}", e),
            DispatchError::Stop(e) => write!(f, "{}", e),
            DispatchError::Settings(e) => {
                write!(f, "failed to open settings screen: {}", e)
            }
        }
    }
}

impl std::error::Error for DispatchError {}

impl From<StartError> for DispatchError {
    fn from(e: StartError) -> Self {
        DispatchError::Start(e)
    }
}

impl From<StopError> for DispatchError {
    fn from(e: StopError) -> Self {
        DispatchError::Stop(e)
    }
}

/// Dispatches method calls from the command layer to the controller.
///
/// All handling is synchronous on the caller's thread; each call completes
/// or fails atomically.
///
/// The front end drives repeated movement by re-submitting `startMocking`
/// with new coordinates; provider registration is idempotent, so on an
/// active session that is equivalent to an in-process
/// [`inject_update`](MockLocationController::inject_update).
#[derive(Debug)]
pub struct MockLocationService {
    controller: MockLocationController,
    navigator: Arc<dyn SettingsNavigator>,
}

impl MockLocationService {
    /// Create a service over a controller and a settings navigator.
    pub fn new(controller: MockLocationController, navigator: Arc<dyn SettingsNavigator>) -> Self {
        Self {
            controller,
            navigator,
        }
    }

    /// Dispatch one method call.
    ///
    /// # Errors
    /// Returns [`DispatchError`] for unknown methods, undecodable arguments,
    /// or a failing underlying operation. The boolean queries never fail;
    /// internal read errors surface as `false` replies.
    pub fn handle(&mut self, call: &MethodCall) -> Result<Reply, DispatchError> {
        match call.method() {
            "startMocking" => {
                let request: FixRequest = serde_json::from_value(call.arguments().clone())
                    .map_err(|e| DispatchError::InvalidArguments(e.to_string()))?;
                self.controller.start(request)?;
                Ok(Reply::Null)
            }
            "stopMocking" => {
                self.controller.stop()?;
                Ok(Reply::Null)
            }
            "isMockLocationEnabled" => Ok(Reply::Bool(self.controller.is_mock_location_active())),
            "isDeveloperModeEnabled" => Ok(Reply::Bool(self.controller.is_developer_mode_enabled())),
            "isMockLocationAppSelected" => Ok(Reply::Bool(self.controller.is_mock_app_selected())),
            "openDeveloperOptions" => {
                self.navigator
                    .open_developer_options()
                    .map_err(DispatchError::Settings)?;
                Ok(Reply::Null)
            }
            "openMockLocationSettings" => {
                self.navigator
                    .open_mock_location_settings()
                    .map_err(DispatchError::Settings)?;
                Ok(Reply::Null)
            }
            other => Err(DispatchError::NotImplemented(other.to_string())),
        }
    }

    /// Access the underlying controller.
    pub fn controller(&self) -> &MockLocationController {
        &self.controller
    }

    /// Mutable access to the underlying controller, for in-process callers
    /// that drive `inject_update` directly.
    pub fn controller_mut(&mut self) -> &mut MockLocationController {
        &mut self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mocks::{FakeNavigator, FakeProviderSink, FakeSettings};
    use serde_json::json;

    fn service(
        settings: Arc<FakeSettings>,
        sink: Arc<FakeProviderSink>,
        navigator: Arc<FakeNavigator>,
    ) -> MockLocationService {
        let controller = MockLocationController::builder(settings, sink, "com.example.app")
            .build()
            .unwrap();
        MockLocationService::new(controller, navigator)
    }

    fn permissive() -> (Arc<FakeSettings>, Arc<FakeProviderSink>, Arc<FakeNavigator>) {
        let settings = Arc::new(FakeSettings::new());
        settings.set_developer_mode(true);
        settings.select_mock_app("com.example.app");
        (
            settings,
            Arc::new(FakeProviderSink::new()),
            Arc::new(FakeNavigator::new()),
        )
    }

    #[test]
    fn test_start_mocking_decodes_arguments() {
        let (settings, sink, navigator) = permissive();
        let mut svc = service(settings, sink.clone(), navigator);

        let call = MethodCall::with_arguments(
            "startMocking",
            json!({"latitude": 37.0, "longitude": -122.0, "accuracy": 5.0, "speed": 10.0}),
        );
        assert_eq!(svc.handle(&call).unwrap(), Reply::Null);

        let fix = sink.last_fix().unwrap();
        assert_eq!(fix.latitude, 37.0);
        assert_eq!(fix.accuracy, 5.0);
        assert_eq!(fix.speed, 10.0);
    }

    #[test]
    fn test_start_mocking_precondition_error_code() {
        let settings = Arc::new(FakeSettings::new());
        let mut svc = service(
            settings,
            Arc::new(FakeProviderSink::new()),
            Arc::new(FakeNavigator::new()),
        );

        let call = MethodCall::with_arguments(
            "startMocking",
            json!({"latitude": 37.0, "longitude": -122.0}),
        );
        let err = svc.handle(&call).unwrap_err();
        assert_eq!(err.code(), "DEVELOPER_MODE_DISABLED");
    }

    #[test]
    fn test_start_mocking_rejects_malformed_arguments() {
        let (settings, sink, navigator) = permissive();
        let mut svc = service(settings, sink, navigator);

        let call = MethodCall::with_arguments("startMocking", json!({"latitude": "north"}));
        let err = svc.handle(&call).unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENTS");
    }

    #[test]
    fn test_stop_mocking_roundtrip() {
        let (settings, sink, navigator) = permissive();
        let mut svc = service(settings, sink.clone(), navigator);

        let start = MethodCall::with_arguments(
            "startMocking",
            json!({"latitude": 37.0, "longitude": -122.0}),
        );
        svc.handle(&start).unwrap();
        assert_eq!(
            svc.handle(&MethodCall::new("isMockLocationEnabled")).unwrap(),
            Reply::Bool(true)
        );

        svc.handle(&MethodCall::new("stopMocking")).unwrap();
        assert_eq!(
            svc.handle(&MethodCall::new("isMockLocationEnabled")).unwrap(),
            Reply::Bool(false)
        );
        assert!(!sink.registered());
    }

    #[test]
    fn test_boolean_queries_never_fail() {
        let (settings, sink, navigator) = permissive();
        settings.fail_reads(true);
        sink.fail_queries(true);
        let mut svc = service(settings, sink, navigator);

        for method in [
            "isMockLocationEnabled",
            "isDeveloperModeEnabled",
            "isMockLocationAppSelected",
        ] {
            assert_eq!(
                svc.handle(&MethodCall::new(method)).unwrap(),
                Reply::Bool(false)
            );
        }
    }

    #[test]
    fn test_open_settings_screens() {
        let (settings, sink, navigator) = permissive();
        let mut svc = service(settings, sink, navigator.clone());

        svc.handle(&MethodCall::new("openDeveloperOptions")).unwrap();
        svc.handle(&MethodCall::new("openMockLocationSettings"))
            .unwrap();

        assert_eq!(navigator.developer_options_opened(), 1);
        assert_eq!(navigator.mock_location_settings_opened(), 1);
    }

    #[test]
    fn test_open_settings_failure_surfaces() {
        let (settings, sink, navigator) = permissive();
        navigator.fail(true);
        let mut svc = service(settings, sink, navigator);

        let err = svc
            .handle(&MethodCall::new("openDeveloperOptions"))
            .unwrap_err();
        assert_eq!(err.code(), "SETTINGS_FAILED");
    }

    #[test]
    fn test_unknown_method_is_not_implemented() {
        let (settings, sink, navigator) = permissive();
        let mut svc = service(settings, sink, navigator);

        let err = svc.handle(&MethodCall::new("selfDestruct")).unwrap_err();
        assert_eq!(err, DispatchError::NotImplemented("selfDestruct".into()));
        assert_eq!(err.code(), "NOT_IMPLEMENTED");
    }

    #[test]
    fn test_error_codes_match_taxonomy() {
        let (settings, sink, navigator) = permissive();
        let mut svc = service(settings, sink.clone(), navigator);

        // Invalid fix value
        let call = MethodCall::with_arguments(
            "startMocking",
            json!({"latitude": 37.0, "longitude": -122.0, "speed": -4.0}),
        );
        assert_eq!(svc.handle(&call).unwrap_err().code(), "INVALID_FIX");

        // Platform refusal
        sink.fail_register(true);
        let call = MethodCall::with_arguments(
            "startMocking",
            json!({"latitude": 37.0, "longitude": -122.0}),
        );
        assert_eq!(svc.handle(&call).unwrap_err().code(), "MOCKING_FAILED");
    }
}
