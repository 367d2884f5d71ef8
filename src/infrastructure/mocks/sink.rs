//! Fake provider sink for testing.

use crate::application::ports::{PlatformError, ProviderCapabilities, ProviderSink};
use crate::domain::fix::LocationFix;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct SinkState {
    registered: bool,
    enabled: bool,
    capabilities: Option<ProviderCapabilities>,
    pushed: Vec<LocationFix>,
    register_count: usize,
    disable_count: usize,
    remove_count: usize,
    fail_register: bool,
    fail_enable: bool,
    fail_push: bool,
    fail_disable: bool,
    fail_remove: bool,
    fail_queries: bool,
}

/// Controllable stand-in for the platform's provider registry.
///
/// Tracks registration and enablement like the platform would, records every
/// pushed fix for assertions, and enforces the platform's ordering rules:
/// enable, push, disable, and remove all fail on an unregistered provider,
/// and push also fails while the provider is disabled.
///
/// Each mutating operation and the queries have an independent failure
/// toggle so tests can fail any single step of the lifecycle.
///
/// Clones share state, so a test can keep a handle while the controller
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeProviderSink {
    state: Arc<Mutex<SinkState>>,
}

impl FakeProviderSink {
    /// Create a sink with no provider registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the provider is currently registered (direct snapshot).
    pub fn registered(&self) -> bool {
        self.lock().registered
    }

    /// Whether the provider is currently enabled (direct snapshot).
    pub fn enabled(&self) -> bool {
        self.lock().enabled
    }

    /// Capabilities supplied at the most recent registration.
    pub fn capabilities(&self) -> Option<ProviderCapabilities> {
        self.lock().capabilities.clone()
    }

    /// All fixes pushed so far, oldest first.
    pub fn pushed(&self) -> Vec<LocationFix> {
        self.lock().pushed.clone()
    }

    /// The most recently pushed fix.
    pub fn last_fix(&self) -> Option<LocationFix> {
        self.lock().pushed.last().copied()
    }

    /// Number of fixes pushed so far.
    pub fn push_count(&self) -> usize {
        self.lock().pushed.len()
    }

    /// Number of times `register` succeeded.
    pub fn register_count(&self) -> usize {
        self.lock().register_count
    }

    /// Number of times `disable` succeeded.
    pub fn disable_count(&self) -> usize {
        self.lock().disable_count
    }

    /// Number of times `remove` succeeded.
    pub fn remove_count(&self) -> usize {
        self.lock().remove_count
    }

    /// Make `register` fail.
    pub fn fail_register(&self, fail: bool) {
        self.lock().fail_register = fail;
    }

    /// Make `enable` fail.
    pub fn fail_enable(&self, fail: bool) {
        self.lock().fail_enable = fail;
    }

    /// Make `push` fail.
    pub fn fail_push(&self, fail: bool) {
        self.lock().fail_push = fail;
    }

    /// Make `disable` fail.
    pub fn fail_disable(&self, fail: bool) {
        self.lock().fail_disable = fail;
    }

    /// Make `remove` fail.
    pub fn fail_remove(&self, fail: bool) {
        self.lock().fail_remove = fail;
    }

    /// Make the `is_registered` / `is_enabled` queries fail.
    pub fn fail_queries(&self, fail: bool) {
        self.lock().fail_queries = fail;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SinkState> {
        self.state.lock().expect(
            "FakeProviderSink mutex poisoned - a test thread panicked while holding the lock",
        )
    }
}

impl ProviderSink for FakeProviderSink {
    fn register(&self, capabilities: &ProviderCapabilities) -> Result<(), PlatformError> {
        let mut state = self.lock();
        if state.fail_register {
            return Err(PlatformError::new("provider registration refused"));
        }
        state.registered = true;
        state.capabilities = Some(capabilities.clone());
        state.register_count += 1;
        Ok(())
    }

    fn enable(&self) -> Result<(), PlatformError> {
        let mut state = self.lock();
        if state.fail_enable {
            return Err(PlatformError::new("provider enable refused"));
        }
        if !state.registered {
            return Err(PlatformError::new("provider is not registered"));
        }
        state.enabled = true;
        Ok(())
    }

    fn push(&self, fix: &LocationFix) -> Result<(), PlatformError> {
        let mut state = self.lock();
        if state.fail_push {
            return Err(PlatformError::new("location push refused"));
        }
        if !state.registered {
            return Err(PlatformError::new("provider is not registered"));
        }
        if !state.enabled {
            return Err(PlatformError::new("provider is not enabled"));
        }
        state.pushed.push(*fix);
        Ok(())
    }

    fn disable(&self) -> Result<(), PlatformError> {
        let mut state = self.lock();
        if state.fail_disable {
            return Err(PlatformError::new("provider disable refused"));
        }
        if !state.registered {
            return Err(PlatformError::new("provider is not registered"));
        }
        state.enabled = false;
        state.disable_count += 1;
        Ok(())
    }

    fn remove(&self) -> Result<(), PlatformError> {
        let mut state = self.lock();
        if state.fail_remove {
            return Err(PlatformError::new("provider removal refused"));
        }
        if !state.registered {
            return Err(PlatformError::new("provider is not registered"));
        }
        state.registered = false;
        state.enabled = false;
        state.capabilities = None;
        state.remove_count += 1;
        Ok(())
    }

    fn is_registered(&self) -> Result<bool, PlatformError> {
        let state = self.lock();
        if state.fail_queries {
            return Err(PlatformError::new("provider registry unavailable"));
        }
        Ok(state.registered)
    }

    fn is_enabled(&self) -> Result<bool, PlatformError> {
        let state = self.lock();
        if state.fail_queries {
            return Err(PlatformError::new("provider registry unavailable"));
        }
        Ok(state.enabled)
    }
}
