use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};
use esp_idf_hal::spi::{SpiDeviceDriver, SpiDriver};
use log::info;

use crate::communication::lora::{LoraTransceiver, RadioError};

// SX1276 register map (LoRa mode)
const REG_FIFO: u8 = 0x00;
const REG_OP_MODE: u8 = 0x01;
const REG_FRF_MSB: u8 = 0x06;
const REG_FRF_MID: u8 = 0x07;
const REG_FRF_LSB: u8 = 0x08;
const REG_PA_CONFIG: u8 = 0x09;
const REG_FIFO_ADDR_PTR: u8 = 0x0D;
const REG_FIFO_TX_BASE_ADDR: u8 = 0x0E;
const REG_IRQ_FLAGS: u8 = 0x12;
const REG_MODEM_CONFIG_1: u8 = 0x1D;
const REG_MODEM_CONFIG_2: u8 = 0x1E;
const REG_PAYLOAD_LENGTH: u8 = 0x22;

const OP_MODE_LONG_RANGE: u8 = 0x80;
const OP_MODE_SLEEP: u8 = 0x00;
const OP_MODE_STDBY: u8 = 0x01;
const OP_MODE_TX: u8 = 0x03;

const IRQ_TX_DONE_MASK: u8 = 0x08;
const PA_BOOST: u8 = 0x80;

// FRF register step: 32 MHz crystal / 2^19
const FREQ_STEP_HZ: f64 = 32_000_000.0 / 524_288.0;

/// Register-level SX1276 driver over SPI.
///
/// Transmit-only: the chip is kept in LoRa standby between transmissions and
/// never enters a receive mode.
pub struct Sx1276<'d> {
    spi: SpiDeviceDriver<'d, SpiDriver<'d>>,
    reset_pin: PinDriver<'d, AnyOutputPin, Output>,
}

impl<'d> Sx1276<'d> {
    pub fn new(
        spi: SpiDeviceDriver<'d, SpiDriver<'d>>,
        reset_pin: PinDriver<'d, AnyOutputPin, Output>,
    ) -> Self {
        Sx1276 { spi, reset_pin }
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), RadioError> {
        let write = [register | 0x80, value];
        self.spi.write(&write).map_err(bus_error)
    }

    fn read_register(&mut self, register: u8) -> Result<u8, RadioError> {
        let write = [register & 0x7F, 0x00];
        let mut read = [0u8; 2];
        self.spi.transfer(&mut read, &write).map_err(bus_error)?;
        Ok(read[1])
    }
}

impl LoraTransceiver for Sx1276<'_> {
    fn reset(&mut self) -> Result<(), RadioError> {
        info!("resetting SX1276");
        self.reset_pin.set_low().map_err(bus_error)?;
        Ets::delay_us(100);
        self.reset_pin.set_high().map_err(bus_error)?;
        FreeRtos::delay_ms(5);

        // LoRa mode is only selectable from sleep
        self.write_register(REG_OP_MODE, OP_MODE_LONG_RANGE | OP_MODE_SLEEP)?;
        self.write_register(REG_FIFO_TX_BASE_ADDR, 0x00)?;
        self.write_register(REG_OP_MODE, OP_MODE_LONG_RANGE | OP_MODE_STDBY)
    }

    fn set_frequency(&mut self, hz: u32) -> Result<(), RadioError> {
        let frf = (hz as f64 / FREQ_STEP_HZ) as u64;
        self.write_register(REG_FRF_MSB, (frf >> 16) as u8)?;
        self.write_register(REG_FRF_MID, (frf >> 8) as u8)?;
        self.write_register(REG_FRF_LSB, frf as u8)
    }

    fn set_spreading_factor(&mut self, sf: u8) -> Result<(), RadioError> {
        let sf = sf.clamp(6, 12);
        let config = self.read_register(REG_MODEM_CONFIG_2)?;
        self.write_register(REG_MODEM_CONFIG_2, (config & 0x0F) | (sf << 4))
    }

    fn set_bandwidth(&mut self, hz: u32) -> Result<(), RadioError> {
        let bw: u8 = match hz {
            7_800 => 0,
            10_400 => 1,
            15_600 => 2,
            20_800 => 3,
            31_250 => 4,
            41_700 => 5,
            62_500 => 6,
            125_000 => 7,
            250_000 => 8,
            _ => 9, // 500 kHz
        };
        let config = self.read_register(REG_MODEM_CONFIG_1)?;
        self.write_register(REG_MODEM_CONFIG_1, (config & 0x0F) | (bw << 4))
    }

    fn set_tx_power(&mut self, dbm: i8) -> Result<(), RadioError> {
        // PA_BOOST output: 2..17 dBm
        let dbm = dbm.clamp(2, 17);
        self.write_register(REG_PA_CONFIG, PA_BOOST | ((dbm - 2) as u8))
    }

    fn enter_tx_mode(&mut self) -> Result<(), RadioError> {
        self.write_register(REG_OP_MODE, OP_MODE_LONG_RANGE | OP_MODE_STDBY)?;
        self.write_register(REG_IRQ_FLAGS, IRQ_TX_DONE_MASK)
    }

    fn write_payload(&mut self, data: &[u8]) -> Result<(), RadioError> {
        self.write_register(REG_FIFO_ADDR_PTR, 0x00)?;
        for &byte in data {
            self.write_register(REG_FIFO, byte)?;
        }
        self.write_register(REG_PAYLOAD_LENGTH, data.len() as u8)?;
        self.write_register(REG_OP_MODE, OP_MODE_LONG_RANGE | OP_MODE_TX)
    }

    fn tx_done(&mut self) -> Result<bool, RadioError> {
        let flags = self.read_register(REG_IRQ_FLAGS)?;
        if flags & IRQ_TX_DONE_MASK != 0 {
            // Clear the flag by writing it back
            self.write_register(REG_IRQ_FLAGS, IRQ_TX_DONE_MASK)?;
            return Ok(true);
        }
        FreeRtos::delay_ms(1);
        Ok(false)
    }
}

fn bus_error(e: esp_idf_sys::EspError) -> RadioError {
    RadioError::Bus(format!("ESP-IDF error: {}", e))
}
