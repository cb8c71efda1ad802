use log::info;

#[derive(Debug, thiserror::Error)]
pub enum SleepError {
    #[error("Invalid sleep duration: {0}")]
    InvalidDuration(String),
}

/// Platform-agnostic deep-sleep abstraction.
pub trait SleepPlatform {
    /// Enter the lowest-power sleep state for the specified duration in
    /// microseconds.
    fn deep_sleep(&self, duration_us: u64);
}

/// ESP-IDF specific deep sleep implementation.
#[cfg(feature = "esp")]
pub struct EspIdfDeepSleep;

#[cfg(feature = "esp")]
impl SleepPlatform for EspIdfDeepSleep {
    fn deep_sleep(&self, duration_us: u64) {
        info!("Entering deep sleep for {} microseconds", duration_us);
        unsafe {
            esp_idf_svc::sys::esp_deep_sleep(duration_us);
        }
    }
}

/// Deep sleep controller with platform abstraction.
pub struct SleepController<P: SleepPlatform> {
    platform: P,
}

impl<P: SleepPlatform> SleepController<P> {
    /// Create a new `SleepController`.
    pub fn new(platform: P) -> Self {
        SleepController { platform }
    }

    /// Sleep for a specified duration in seconds.
    pub fn sleep_for_duration(&self, duration_seconds: u64) -> Result<(), SleepError> {
        if duration_seconds == 0 {
            return Err(SleepError::InvalidDuration(
                "Sleep duration must be greater than 0".to_string(),
            ));
        }

        let duration_us = duration_seconds
            .checked_mul(1_000_000)
            .ok_or_else(|| SleepError::InvalidDuration("Duration overflow".to_string()))?;

        info!(
            "Sleeping for {} seconds ({} microseconds)",
            duration_seconds, duration_us
        );
        self.platform.deep_sleep(duration_us);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::power::mock::MockSleepPlatform;

    #[test]
    fn zero_duration_is_rejected() {
        let controller = SleepController::new(MockSleepPlatform::new());
        assert!(controller.sleep_for_duration(0).is_err());
    }

    #[test]
    fn overflowing_duration_is_rejected() {
        let controller = SleepController::new(MockSleepPlatform::new());
        assert!(controller.sleep_for_duration(u64::MAX).is_err());
    }

    #[test]
    fn duration_is_converted_to_microseconds() {
        let platform = MockSleepPlatform::new();
        let log = platform.sleep_log();
        let controller = SleepController::new(platform);

        controller.sleep_for_duration(300).unwrap();
        assert_eq!(*log.lock().unwrap(), vec![300_000_000u64]);
    }
}
