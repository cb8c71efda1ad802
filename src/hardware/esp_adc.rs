use std::rc::Rc;

use esp_idf_hal::adc::attenuation::DB_12;
use esp_idf_hal::adc::oneshot::config::{AdcChannelConfig, Calibration};
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::adc::ADC1;
use esp_idf_hal::gpio::{Gpio1, Gpio2, Gpio3, Gpio4};
use log::info;

use crate::hardware::adc::{AdcChannel, AdcConverter, AdcError};

type Channel<'d, P> = AdcChannelDriver<'d, P, Rc<AdcDriver<'d, ADC1>>>;

/// ADC1 adapter over the four water-quality probe lines.
///
/// The esp-idf oneshot API completes a conversion inside `read_raw`, so the
/// start/poll split of [`AdcConverter`] collapses here: `start_conversion`
/// performs the conversion and `conversion_ready` reports the stored result.
pub struct EspAdcConverter<'d> {
    ph: Channel<'d, Gpio1>,
    turbidity: Channel<'d, Gpio2>,
    salinity: Channel<'d, Gpio3>,
    ammonia: Channel<'d, Gpio4>,
    selected: Option<AdcChannel>,
    completed: Option<u16>,
}

impl<'d> EspAdcConverter<'d> {
    pub fn new(
        adc1: ADC1,
        ph_pin: Gpio1,
        turbidity_pin: Gpio2,
        salinity_pin: Gpio3,
        ammonia_pin: Gpio4,
    ) -> Result<Self, AdcError> {
        info!("initializing ADC1 probe channels");
        let driver = Rc::new(AdcDriver::new(adc1).map_err(esp_error)?);
        let config = AdcChannelConfig {
            attenuation: DB_12,
            calibration: Calibration::None,
            ..Default::default()
        };

        Ok(EspAdcConverter {
            ph: AdcChannelDriver::new(driver.clone(), ph_pin, &config).map_err(esp_error)?,
            turbidity: AdcChannelDriver::new(driver.clone(), turbidity_pin, &config)
                .map_err(esp_error)?,
            salinity: AdcChannelDriver::new(driver.clone(), salinity_pin, &config)
                .map_err(esp_error)?,
            ammonia: AdcChannelDriver::new(driver, ammonia_pin, &config).map_err(esp_error)?,
            selected: None,
            completed: None,
        })
    }
}

impl AdcConverter for EspAdcConverter<'_> {
    fn configure_channel(&mut self, channel: AdcChannel) -> Result<(), AdcError> {
        self.selected = Some(channel);
        self.completed = None;
        Ok(())
    }

    fn start_conversion(&mut self) -> Result<(), AdcError> {
        let raw = match self.selected {
            Some(AdcChannel::Ch1) => self.ph.read_raw(),
            Some(AdcChannel::Ch2) => self.turbidity.read_raw(),
            Some(AdcChannel::Ch3) => self.salinity.read_raw(),
            Some(AdcChannel::Ch4) => self.ammonia.read_raw(),
            None => return Err(AdcError::Hardware("no channel configured".to_string())),
        }
        .map_err(esp_error)?;

        self.completed = Some(raw);
        Ok(())
    }

    fn conversion_ready(&mut self) -> Result<bool, AdcError> {
        Ok(self.completed.is_some())
    }

    fn read_raw(&mut self) -> Result<u16, AdcError> {
        self.completed
            .take()
            .ok_or_else(|| AdcError::Hardware("no completed conversion".to_string()))
    }
}

fn esp_error(e: esp_idf_sys::EspError) -> AdcError {
    AdcError::Hardware(format!("ESP-IDF error: {}", e))
}
