use log::warn;

/// Converter reference voltage (volts).
pub const ADC_REFERENCE_VOLTAGE: f32 = 3.3;

/// Full-scale divisor for the 12-bit converter.
pub const ADC_FULL_SCALE: f32 = 4096.0;

/// Largest raw code the converter can produce.
pub const ADC_MAX_RAW: u16 = 4095;

/// Analog input lines of the sensor panel, in sampling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcChannel {
    Ch1,
    Ch2,
    Ch3,
    Ch4,
}

impl AdcChannel {
    /// Hardware channel number on the converter.
    pub fn number(self) -> u8 {
        match self {
            AdcChannel::Ch1 => 1,
            AdcChannel::Ch2 => 2,
            AdcChannel::Ch3 => 3,
            AdcChannel::Ch4 => 4,
        }
    }
}

/// ADC acquisition errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AdcError {
    #[error("ADC conversion timed out on channel {}", .0.number())]
    ConversionTimeout(AdcChannel),

    #[error("ADC hardware error: {0}")]
    Hardware(String),
}

/// Capability trait over the analog-to-digital converter.
///
/// Implemented by the esp-idf adapter on the device and by
/// [`crate::hardware::mock::MockAdcConverter`] on the host. The conversion
/// state machine is start → busy → done; starting the next conversion resets
/// it.
pub trait AdcConverter {
    /// Select the input channel for the next conversion.
    fn configure_channel(&mut self, channel: AdcChannel) -> Result<(), AdcError>;

    /// Kick off one conversion on the configured channel.
    fn start_conversion(&mut self) -> Result<(), AdcError>;

    /// Whether the running conversion has completed.
    fn conversion_ready(&mut self) -> Result<bool, AdcError>;

    /// Raw code of the completed conversion, in `[0, 4095]`.
    fn read_raw(&mut self) -> Result<u16, AdcError>;
}

/// Linear scaling from a raw converter code to volts.
pub fn raw_to_voltage(raw: u16) -> f32 {
    raw as f32 * ADC_REFERENCE_VOLTAGE / ADC_FULL_SCALE
}

/// Calibrated single-channel reader with a bounded conversion wait.
pub struct AnalogReader<C: AdcConverter> {
    converter: C,
    max_polls: u32,
}

impl<C: AdcConverter> AnalogReader<C> {
    pub fn new(converter: C, max_polls: u32) -> Self {
        AnalogReader {
            converter,
            max_polls,
        }
    }

    /// Sample one channel and return the calibrated voltage.
    ///
    /// Polls the converter at most `max_polls` times; a conversion that never
    /// completes is reported as [`AdcError::ConversionTimeout`] instead of
    /// blocking the duty cycle.
    pub fn read(&mut self, channel: AdcChannel) -> Result<f32, AdcError> {
        self.converter.configure_channel(channel)?;
        self.converter.start_conversion()?;

        let mut polls: u32 = 0;
        while !self.converter.conversion_ready()? {
            polls += 1;
            if polls >= self.max_polls {
                warn!(
                    "ADC conversion on channel {} exceeded {} polls",
                    channel.number(),
                    self.max_polls
                );
                return Err(AdcError::ConversionTimeout(channel));
            }
        }

        let raw = self.converter.read_raw()?;
        Ok(raw_to_voltage(raw))
    }

    /// Start a conversion without waiting for it, as a converter warm-up.
    pub fn start_warmup(&mut self, channel: AdcChannel) -> Result<(), AdcError> {
        self.converter.configure_channel(channel)?;
        self.converter.start_conversion()
    }
}
