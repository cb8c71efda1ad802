/*!
 * # Aqua Sensor Node Library
 *
 * Battery-powered water-quality telemetry node: sample four analog sensors,
 * encode the snapshot into a compact ASCII line, transmit it over a LoRa link
 * and deep-sleep until the next cycle.
 *
 * ## Module layout
 * - `core`: application core (config, reading snapshot, payload encoding,
 *   duty-cycle control)
 * - `hardware`: analog acquisition (ADC converter capability, sensor panel)
 * - `communication`: LoRa radio link and transceiver driver
 * - `power`: deep-sleep management
 *
 * Hardware adapters live behind the `esp` cargo feature; with default
 * features the library builds on a host toolchain and the mock
 * implementations are available for tests.
 */

pub mod communication;
pub mod core;
pub mod hardware;
pub mod power;

pub use communication::lora::{LoraTransceiver, RadioConfig, RadioError, RadioLink};
pub use core::config::{AppConfig, ConfigError};
pub use core::duty_cycle::{CycleError, DutyCycleController};
pub use core::payload::{encode_reading, Payload, MAX_PAYLOAD_LEN};
pub use core::reading::Reading;
pub use hardware::adc::{AdcChannel, AdcConverter, AdcError, AnalogReader};
pub use hardware::sensor_panel::{FixedTemperatureProbe, SensorPanel, TemperatureSource};
pub use power::sleep::{SleepController, SleepError, SleepPlatform};

/// Library version, for the startup banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
