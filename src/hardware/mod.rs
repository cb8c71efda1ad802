/// Hardware acquisition modules
pub mod adc;
pub mod sensor_panel;

#[cfg(feature = "esp")]
pub mod esp_adc;

// Mock implementation (available for tests and non-esp builds)
#[cfg(not(feature = "esp"))]
pub mod mock;

pub use adc::{AdcChannel, AdcConverter, AdcError, AnalogReader};
pub use sensor_panel::{FixedTemperatureProbe, SensorPanel, TemperatureSource};

#[cfg(feature = "esp")]
pub use esp_adc::EspAdcConverter;
