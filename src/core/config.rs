/// Build-time application configuration.
///
/// Values are read from `cfg.toml` by `toml_cfg` at compile time; the
/// defaults below apply when the file is absent.
#[toml_cfg::toml_config]
pub struct Config {
    // Deep-sleep duration between duty cycles (seconds)
    #[default(300)]
    sleep_duration_seconds: u64,

    // Poll budget while waiting for an ADC conversion to complete
    #[default(10_000)]
    adc_max_conversion_polls: u32,

    // Poll budget while waiting for the transceiver's TX-done flag
    #[default(50_000)]
    radio_max_tx_polls: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("sleep_duration_seconds must be greater than 0")]
    InvalidSleepDuration,
    #[error("poll budget for {0} must be greater than 0")]
    InvalidPollBudget(&'static str),
}

/// Validated runtime view of the build-time configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Deep-sleep duration between duty cycles (seconds).
    pub sleep_duration_seconds: u64,

    /// Bounded-wait budget for one ADC conversion.
    pub adc_max_conversion_polls: u32,

    /// Bounded-wait budget for one radio transmission.
    pub radio_max_tx_polls: u32,
}

impl AppConfig {
    /// Load and validate the configuration generated from `cfg.toml`.
    pub fn load() -> Result<Self, ConfigError> {
        let config = CONFIG;
        Self::from_values(
            config.sleep_duration_seconds,
            config.adc_max_conversion_polls,
            config.radio_max_tx_polls,
        )
    }

    fn from_values(
        sleep_duration_seconds: u64,
        adc_max_conversion_polls: u32,
        radio_max_tx_polls: u32,
    ) -> Result<Self, ConfigError> {
        if sleep_duration_seconds == 0 {
            return Err(ConfigError::InvalidSleepDuration);
        }
        if adc_max_conversion_polls == 0 {
            return Err(ConfigError::InvalidPollBudget("adc_max_conversion_polls"));
        }
        if radio_max_tx_polls == 0 {
            return Err(ConfigError::InvalidPollBudget("radio_max_tx_polls"));
        }

        Ok(AppConfig {
            sleep_duration_seconds,
            adc_max_conversion_polls,
            radio_max_tx_polls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        let config = AppConfig::load().unwrap();
        assert!(config.sleep_duration_seconds > 0);
        assert!(config.adc_max_conversion_polls > 0);
        assert!(config.radio_max_tx_polls > 0);
    }

    #[test]
    fn zero_sleep_duration_is_rejected() {
        let result = AppConfig::from_values(0, 100, 100);
        assert!(matches!(result, Err(ConfigError::InvalidSleepDuration)));
    }

    #[test]
    fn zero_poll_budgets_are_rejected() {
        assert!(matches!(
            AppConfig::from_values(60, 0, 100),
            Err(ConfigError::InvalidPollBudget("adc_max_conversion_polls"))
        ));
        assert!(matches!(
            AppConfig::from_values(60, 100, 0),
            Err(ConfigError::InvalidPollBudget("radio_max_tx_polls"))
        ));
    }
}
