use std::sync::Arc;

use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use esp_idf_hal::spi::{config::Config as SpiConfig, SpiDeviceDriver, SpiDriver, SpiDriverConfig};
use log::{error, info};

use aqua_sensor_node::communication::lora::sx1276::Sx1276;
use aqua_sensor_node::hardware::esp_adc::EspAdcConverter;
use aqua_sensor_node::hardware::sensor_panel::PLACEHOLDER_TEMPERATURE_C;
use aqua_sensor_node::power::sleep::EspIdfDeepSleep;
use aqua_sensor_node::{
    AnalogReader, AppConfig, DutyCycleController, FixedTemperatureProbe, RadioConfig, RadioLink,
    SensorPanel, SleepController,
};

/// Firmware entry point: bring up peripherals, hand them to the duty-cycle
/// controller and never come back.
fn main() -> anyhow::Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    info!("aqua-sensor-node v{}", aqua_sensor_node::VERSION);

    let app_config = Arc::new(AppConfig::load().map_err(|e| {
        error!("configuration error: {}", e);
        anyhow::anyhow!("configuration error: {}", e)
    })?);

    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    // Analog panel: pH, turbidity, salinity, ammonia on ADC1
    let converter = EspAdcConverter::new(
        peripherals.adc1,
        pins.gpio1,
        pins.gpio2,
        pins.gpio3,
        pins.gpio4,
    )
    .map_err(|e| anyhow::anyhow!("ADC bring-up failed: {}", e))?;

    let reader = AnalogReader::new(converter, app_config.adc_max_conversion_polls);
    // External temperature probe is not integrated yet; report the fixed
    // placeholder until it is.
    let probe = FixedTemperatureProbe(PLACEHOLDER_TEMPERATURE_C);
    let mut panel = SensorPanel::new(reader, probe);
    panel
        .init()
        .map_err(|e| anyhow::anyhow!("ADC warm-up failed: {}", e))?;

    // SX1276 on SPI2
    let spi = SpiDriver::new(
        peripherals.spi2,
        pins.gpio7,
        pins.gpio9,
        Some(pins.gpio8),
        &SpiDriverConfig::new(),
    )?;
    let spi_device = SpiDeviceDriver::new(spi, Some(pins.gpio10), &SpiConfig::new().baudrate(8.MHz().into()))?;
    let reset_pin = PinDriver::output(pins.gpio6.downgrade_output())?;

    let transceiver = Sx1276::new(spi_device, reset_pin);
    let mut radio = RadioLink::new(
        transceiver,
        RadioConfig::default(),
        app_config.radio_max_tx_polls,
    );
    radio
        .init()
        .map_err(|e| anyhow::anyhow!("radio bring-up failed: {}", e))?;

    let sleep = SleepController::new(EspIdfDeepSleep);

    let mut controller = DutyCycleController::new(panel, radio, sleep, app_config);
    controller.run()
}
