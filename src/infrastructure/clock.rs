//! Clock adapters for time operations.
//!
//! Provides SystemClock implementation for production use.
//!
//! # Testing
//!
//! See `MockClock` (in `crate::infrastructure::mocks`) for a controllable
//! test clock. Available with the `test-helpers` feature or in test builds:
//!
//! ```toml
//! [dev-dependencies]
//! mock-location = { version = "*", features = ["test-helpers"] }
//! ```

use crate::application::ports::Clock;
use std::sync::OnceLock;
use std::time::{Duration, Instant, SystemTime};

/// Process-wide origin for the monotonic marker, captured on first use.
fn monotonic_origin() -> Instant {
    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    *ORIGIN.get_or_init(Instant::now)
}

/// System clock implementation using `SystemTime::now()` and
/// `Instant::now()` against a process-wide origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn wall_time(&self) -> SystemTime {
        SystemTime::now()
    }

    fn monotonic(&self) -> Duration {
        monotonic_origin().elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock::new();
        let t1 = clock.monotonic();
        std::thread::sleep(Duration::from_millis(10));
        let t2 = clock.monotonic();

        assert!(t2 > t1);
    }

    #[test]
    fn test_wall_time_is_after_epoch() {
        let clock = SystemClock::new();
        assert!(clock.wall_time() > SystemTime::UNIX_EPOCH);
    }
}
