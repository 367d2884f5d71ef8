//! Fake platform settings and settings navigation for testing.

use crate::application::ports::{PlatformError, SettingsNavigator, SettingsReader};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct FakeSettingsState {
    developer_mode: bool,
    mock_app: Option<String>,
    fail_reads: bool,
}

/// Controllable stand-in for the platform's settings store.
///
/// Tests flip the developer mode flag and the mock-app selection to drive
/// the controller's precondition checks, and can make every read fail to
/// exercise the swallow-to-`false` behavior.
///
/// Clones share state, so a test can keep a handle while the controller
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeSettings {
    state: Arc<Mutex<FakeSettingsState>>,
}

impl FakeSettings {
    /// Create fake settings: developer mode off, no mock app selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the developer mode flag.
    pub fn set_developer_mode(&self, enabled: bool) {
        self.lock().developer_mode = enabled;
    }

    /// Select the given app identity as the platform's mock location app.
    pub fn select_mock_app(&self, identity: impl Into<String>) {
        self.lock().mock_app = Some(identity.into());
    }

    /// Clear the mock location app selection.
    pub fn clear_mock_app(&self) {
        self.lock().mock_app = None;
    }

    /// Make every settings read fail, simulating a permission-denied or
    /// missing-setting condition.
    pub fn fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeSettingsState> {
        self.state
            .lock()
            .expect("FakeSettings mutex poisoned - a test thread panicked while holding the lock")
    }
}

impl SettingsReader for FakeSettings {
    fn developer_mode_enabled(&self) -> Result<bool, PlatformError> {
        let state = self.lock();
        if state.fail_reads {
            return Err(PlatformError::new("settings read denied"));
        }
        Ok(state.developer_mode)
    }

    fn selected_mock_app(&self) -> Result<Option<String>, PlatformError> {
        let state = self.lock();
        if state.fail_reads {
            return Err(PlatformError::new("settings read denied"));
        }
        Ok(state.mock_app.clone())
    }
}

#[derive(Debug, Default)]
struct FakeNavigatorState {
    developer_options_opened: usize,
    mock_location_settings_opened: usize,
    fail: bool,
}

/// Records settings-screen navigations instead of launching system UI.
#[derive(Debug, Clone, Default)]
pub struct FakeNavigator {
    state: Arc<Mutex<FakeNavigatorState>>,
}

impl FakeNavigator {
    /// Create a navigator that records navigations.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the developer options screen was opened.
    pub fn developer_options_opened(&self) -> usize {
        self.lock().developer_options_opened
    }

    /// How many times the mock location settings screen was opened.
    pub fn mock_location_settings_opened(&self) -> usize {
        self.lock().mock_location_settings_opened
    }

    /// Make every navigation fail.
    pub fn fail(&self, fail: bool) {
        self.lock().fail = fail;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeNavigatorState> {
        self.state
            .lock()
            .expect("FakeNavigator mutex poisoned - a test thread panicked while holding the lock")
    }
}

impl SettingsNavigator for FakeNavigator {
    fn open_developer_options(&self) -> Result<(), PlatformError> {
        let mut state = self.lock();
        if state.fail {
            return Err(PlatformError::new("no activity handles settings intent"));
        }
        state.developer_options_opened += 1;
        Ok(())
    }

    fn open_mock_location_settings(&self) -> Result<(), PlatformError> {
        let mut state = self.lock();
        if state.fail {
            return Err(PlatformError::new("no activity handles settings intent"));
        }
        state.mock_location_settings_opened += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_to_locked_down() {
        let settings = FakeSettings::new();

        assert_eq!(settings.developer_mode_enabled(), Ok(false));
        assert_eq!(settings.selected_mock_app(), Ok(None));
    }

    #[test]
    fn test_selection_roundtrip() {
        let settings = FakeSettings::new();
        settings.select_mock_app("com.example.app");
        assert_eq!(
            settings.selected_mock_app(),
            Ok(Some("com.example.app".to_string()))
        );

        settings.clear_mock_app();
        assert_eq!(settings.selected_mock_app(), Ok(None));
    }

    #[test]
    fn test_failing_reads() {
        let settings = FakeSettings::new();
        settings.set_developer_mode(true);
        settings.fail_reads(true);

        assert!(settings.developer_mode_enabled().is_err());
        assert!(settings.selected_mock_app().is_err());
    }

    #[test]
    fn test_navigator_records_opens() {
        let navigator = FakeNavigator::new();
        navigator.open_developer_options().unwrap();
        navigator.open_developer_options().unwrap();
        navigator.open_mock_location_settings().unwrap();

        assert_eq!(navigator.developer_options_opened(), 2);
        assert_eq!(navigator.mock_location_settings_opened(), 1);
    }
}
