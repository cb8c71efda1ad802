use log::{debug, info};

use crate::core::reading::Reading;
use crate::hardware::adc::{AdcChannel, AdcConverter, AdcError, AnalogReader};

/// Analog input line of each probe on the carrier board.
pub const PH_CHANNEL: AdcChannel = AdcChannel::Ch1;
pub const TURBIDITY_CHANNEL: AdcChannel = AdcChannel::Ch2;
pub const SALINITY_CHANNEL: AdcChannel = AdcChannel::Ch3;
pub const AMMONIA_CHANNEL: AdcChannel = AdcChannel::Ch4;

/// Stand-in value reported until the external temperature probe is wired up.
pub const PLACEHOLDER_TEMPERATURE_C: f32 = 25.0;

/// Source of the water temperature.
///
/// The temperature probe is a digital unit separate from the analog panel and
/// is not integrated yet; [`FixedTemperatureProbe`] keeps that seam visible
/// until it is.
pub trait TemperatureSource {
    fn read_celsius(&mut self) -> f32;
}

/// Placeholder temperature source reporting a fixed value.
pub struct FixedTemperatureProbe(pub f32);

impl TemperatureSource for FixedTemperatureProbe {
    fn read_celsius(&mut self) -> f32 {
        self.0
    }
}

/// The fixed set of analog water-quality probes plus the temperature source.
///
/// Produces one [`Reading`] per duty cycle; channels are sampled in a fixed
/// order (pH, turbidity, salinity, ammonia).
pub struct SensorPanel<C: AdcConverter, T: TemperatureSource> {
    reader: AnalogReader<C>,
    temperature: T,
}

impl<C: AdcConverter, T: TemperatureSource> SensorPanel<C, T> {
    pub fn new(reader: AnalogReader<C>, temperature: T) -> Self {
        SensorPanel {
            reader,
            temperature,
        }
    }

    /// One-time converter warm-up before the first cycle: starts a conversion
    /// without waiting for it.
    pub fn init(&mut self) -> Result<(), AdcError> {
        info!("warming up ADC");
        self.reader.start_warmup(PH_CHANNEL)
    }

    /// Sample every probe and assemble the snapshot for this cycle.
    pub fn sample(&mut self) -> Result<Reading, AdcError> {
        let ph = self.reader.read(PH_CHANNEL)?;
        let turbidity = self.reader.read(TURBIDITY_CHANNEL)?;
        let salinity = self.reader.read(SALINITY_CHANNEL)?;
        let ammonia = self.reader.read(AMMONIA_CHANNEL)?;
        let temperature = self.temperature.read_celsius();

        debug!(
            "sampled ph={:.2} turbidity={:.2} salinity={:.2} ammonia={:.2} temperature={:.1}",
            ph, turbidity, salinity, ammonia, temperature
        );

        Ok(Reading::new(ph, turbidity, salinity, ammonia, temperature))
    }
}
