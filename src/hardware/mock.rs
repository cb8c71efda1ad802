use std::collections::HashMap;

use crate::hardware::adc::{AdcChannel, AdcConverter, AdcError};

/// Scripted ADC converter for host tests.
///
/// Each channel returns a preset raw code (default 0). The conversion state
/// machine mirrors the real converter: a conversion must be started before
/// `read_raw`, and starting a new one discards the previous result.
#[derive(Debug, Default)]
pub struct MockAdcConverter {
    channel_codes: HashMap<u8, u16>,
    selected: Option<AdcChannel>,
    converting: bool,
    ready: bool,
    /// When set, conversions never complete (timeout simulation).
    stuck: bool,
    /// When set, every operation fails with a hardware error.
    fail_hardware: bool,
}

impl MockAdcConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset the raw code returned for a channel.
    pub fn set_channel_code(&mut self, channel: AdcChannel, code: u16) {
        self.channel_codes.insert(channel.number(), code);
    }

    /// Simulate a conversion that never completes.
    pub fn set_stuck(&mut self, stuck: bool) {
        self.stuck = stuck;
    }

    /// Simulate a converter hardware fault.
    pub fn set_hardware_failure(&mut self, fail: bool) {
        self.fail_hardware = fail;
    }

    fn check_hardware(&self) -> Result<(), AdcError> {
        if self.fail_hardware {
            return Err(AdcError::Hardware("simulated converter fault".to_string()));
        }
        Ok(())
    }
}

impl AdcConverter for MockAdcConverter {
    fn configure_channel(&mut self, channel: AdcChannel) -> Result<(), AdcError> {
        self.check_hardware()?;
        self.selected = Some(channel);
        Ok(())
    }

    fn start_conversion(&mut self) -> Result<(), AdcError> {
        self.check_hardware()?;
        if self.selected.is_none() {
            return Err(AdcError::Hardware("no channel configured".to_string()));
        }
        self.converting = true;
        self.ready = false;
        Ok(())
    }

    fn conversion_ready(&mut self) -> Result<bool, AdcError> {
        self.check_hardware()?;
        if self.stuck || !self.converting {
            return Ok(false);
        }
        self.ready = true;
        Ok(true)
    }

    fn read_raw(&mut self) -> Result<u16, AdcError> {
        self.check_hardware()?;
        if !self.ready {
            return Err(AdcError::Hardware("no completed conversion".to_string()));
        }
        self.converting = false;
        self.ready = false;
        let channel = self.selected.expect("ready implies configured");
        Ok(*self.channel_codes.get(&channel.number()).unwrap_or(&0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::adc::AnalogReader;

    #[test]
    fn test_mock_returns_preset_code() {
        let mut mock = MockAdcConverter::new();
        mock.set_channel_code(AdcChannel::Ch2, 1234);

        let mut reader = AnalogReader::new(mock, 4);
        let voltage = reader.read(AdcChannel::Ch2).unwrap();
        assert_eq!(voltage, 1234.0 * 3.3 / 4096.0);
    }

    #[test]
    fn test_mock_unconfigured_channel_defaults_to_zero() {
        let mut reader = AnalogReader::new(MockAdcConverter::new(), 4);
        assert_eq!(reader.read(AdcChannel::Ch3).unwrap(), 0.0);
    }

    #[test]
    fn test_mock_stuck_conversion_times_out() {
        let mut mock = MockAdcConverter::new();
        mock.set_stuck(true);

        let mut reader = AnalogReader::new(mock, 5);
        let result = reader.read(AdcChannel::Ch1);
        assert_eq!(result, Err(AdcError::ConversionTimeout(AdcChannel::Ch1)));
    }

    #[test]
    fn test_mock_hardware_failure_propagates() {
        let mut mock = MockAdcConverter::new();
        mock.set_hardware_failure(true);

        let mut reader = AnalogReader::new(mock, 5);
        assert!(matches!(
            reader.read(AdcChannel::Ch1),
            Err(AdcError::Hardware(_))
        ));
    }

    #[test]
    fn test_mock_read_without_conversion_is_an_error() {
        let mut mock = MockAdcConverter::new();
        assert!(mock.read_raw().is_err());
    }
}
