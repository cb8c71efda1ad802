use std::sync::{Arc, Mutex};

use crate::power::sleep::SleepPlatform;

/// Recording sleep platform for host tests.
///
/// Real deep sleep never returns; this mock records the requested durations
/// and returns so tests can drive multiple cycles.
#[derive(Debug, Clone, Default)]
pub struct MockSleepPlatform {
    sleeps_us: Arc<Mutex<Vec<u64>>>,
}

impl MockSleepPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the recorded sleep durations (microseconds).
    pub fn sleep_log(&self) -> Arc<Mutex<Vec<u64>>> {
        self.sleeps_us.clone()
    }
}

impl SleepPlatform for MockSleepPlatform {
    fn deep_sleep(&self, duration_us: u64) {
        self.sleeps_us.lock().unwrap().push(duration_us);
    }
}
