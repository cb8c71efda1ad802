/// Power management modules
pub mod sleep;

// Mock implementation (available for tests and non-esp builds)
#[cfg(not(feature = "esp"))]
pub mod mock;

pub use sleep::{SleepController, SleepError, SleepPlatform};

#[cfg(feature = "esp")]
pub use sleep::EspIdfDeepSleep;
