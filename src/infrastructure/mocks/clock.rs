//! Mock clock for testing.

use crate::application::ports::Clock;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

#[derive(Debug, Clone, Copy)]
struct MockClockState {
    wall: SystemTime,
    elapsed: Duration,
}

/// Mock clock for testing.
///
/// Allows tests to control both the wall clock and the monotonic marker
/// explicitly, enabling deterministic assertions on fix timestamps.
///
/// # Examples
///
/// ```
/// use mock_location::infrastructure::mocks::MockClock;
/// use mock_location::Clock;
/// use std::time::{Duration, SystemTime};
///
/// let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
/// let clock = MockClock::new(start, Duration::ZERO);
///
/// assert_eq!(clock.wall_time(), start);
/// assert_eq!(clock.monotonic(), Duration::ZERO);
///
/// // Advancing moves both clocks together
/// clock.advance(Duration::from_secs(10));
/// assert_eq!(clock.wall_time(), start + Duration::from_secs(10));
/// assert_eq!(clock.monotonic(), Duration::from_secs(10));
/// ```
///
/// # Thread Safety
///
/// `MockClock` is thread-safe and can be cloned to share across threads.
/// All clones share the same underlying time values.
#[derive(Debug, Clone)]
pub struct MockClock {
    state: Arc<Mutex<MockClockState>>,
}

impl MockClock {
    /// Create a mock clock with the given wall time and monotonic marker.
    pub fn new(wall: SystemTime, elapsed: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockClockState { wall, elapsed })),
        }
    }

    /// Advance both clocks by a duration.
    pub fn advance(&self, duration: Duration) {
        let mut state = self
            .state
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        state.wall += duration;
        state.elapsed += duration;
    }

    /// Set the wall clock, leaving the monotonic marker untouched.
    pub fn set_wall(&self, wall: SystemTime) {
        let mut state = self
            .state
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        state.wall = wall;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new(SystemTime::UNIX_EPOCH, Duration::ZERO)
    }
}

impl Clock for MockClock {
    fn wall_time(&self) -> SystemTime {
        self.state
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
            .wall
    }

    fn monotonic(&self) -> Duration {
        self.state
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
            .elapsed
    }
}
