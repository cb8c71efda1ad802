use log::{info, warn};

#[cfg(feature = "esp")]
pub mod sx1276;

// Mock implementation (available for tests and non-esp builds)
#[cfg(not(feature = "esp"))]
pub mod mock;

/// Carrier frequency of the EU868 uplink (Hz). Must match the gateway.
pub const LORA_FREQUENCY_HZ: u32 = 868_000_000;

/// Spreading factor. Must match the gateway.
pub const LORA_SPREADING_FACTOR: u8 = 7;

/// Channel bandwidth (Hz). Must match the gateway.
pub const LORA_BANDWIDTH_HZ: u32 = 125_000;

/// Transmit power (dBm).
pub const LORA_TX_POWER_DBM: i8 = 14;

/// RF parameters, applied once at startup and never renegotiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioConfig {
    pub frequency_hz: u32,
    pub spreading_factor: u8,
    pub bandwidth_hz: u32,
    pub tx_power_dbm: i8,
}

impl Default for RadioConfig {
    fn default() -> Self {
        RadioConfig {
            frequency_hz: LORA_FREQUENCY_HZ,
            spreading_factor: LORA_SPREADING_FACTOR,
            bandwidth_hz: LORA_BANDWIDTH_HZ,
            tx_power_dbm: LORA_TX_POWER_DBM,
        }
    }
}

/// Radio link errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RadioError {
    #[error("transceiver bus error: {0}")]
    Bus(String),

    #[error("transmission did not complete within {0} polls")]
    TxTimeout(u32),

    #[error("radio used before init")]
    NotInitialized,
}

/// Capability trait over the packet-radio transceiver.
///
/// Mirrors the driver surface of an SX1276-class chip; implemented by
/// [`sx1276::Sx1276`] on the device and by [`mock::MockTransceiver`] on the
/// host.
pub trait LoraTransceiver {
    fn reset(&mut self) -> Result<(), RadioError>;
    fn set_frequency(&mut self, hz: u32) -> Result<(), RadioError>;
    fn set_spreading_factor(&mut self, sf: u8) -> Result<(), RadioError>;
    fn set_bandwidth(&mut self, hz: u32) -> Result<(), RadioError>;
    fn set_tx_power(&mut self, dbm: i8) -> Result<(), RadioError>;
    fn enter_tx_mode(&mut self) -> Result<(), RadioError>;
    fn write_payload(&mut self, data: &[u8]) -> Result<(), RadioError>;
    /// Whether the in-flight transmission has completed.
    fn tx_done(&mut self) -> Result<bool, RadioError>;
}

/// Transmit-only LoRa uplink.
///
/// Owns the transceiver for the process lifetime. `init` applies the RF
/// configuration exactly once; `send` is synchronous and waits (bounded) for
/// the transmission to complete. There is no receive path.
pub struct RadioLink<T: LoraTransceiver> {
    transceiver: T,
    config: RadioConfig,
    max_tx_polls: u32,
    initialized: bool,
}

impl<T: LoraTransceiver> RadioLink<T> {
    pub fn new(transceiver: T, config: RadioConfig, max_tx_polls: u32) -> Self {
        RadioLink {
            transceiver,
            config,
            max_tx_polls,
            initialized: false,
        }
    }

    /// Reset the transceiver and apply the RF parameters.
    ///
    /// Must be called once before the first `send`.
    pub fn init(&mut self) -> Result<(), RadioError> {
        info!(
            "configuring radio: {} Hz, SF{}, {} Hz bandwidth, {} dBm",
            self.config.frequency_hz,
            self.config.spreading_factor,
            self.config.bandwidth_hz,
            self.config.tx_power_dbm
        );

        self.transceiver.reset()?;
        self.transceiver.set_frequency(self.config.frequency_hz)?;
        self.transceiver
            .set_spreading_factor(self.config.spreading_factor)?;
        self.transceiver.set_bandwidth(self.config.bandwidth_hz)?;
        self.transceiver.set_tx_power(self.config.tx_power_dbm)?;

        self.initialized = true;
        Ok(())
    }

    /// Transmit one payload and wait for completion.
    ///
    /// Polls the TX-done flag at most `max_tx_polls` times; a transmission
    /// that never completes is reported as [`RadioError::TxTimeout`].
    pub fn send(&mut self, payload: &[u8]) -> Result<(), RadioError> {
        if !self.initialized {
            return Err(RadioError::NotInitialized);
        }

        self.transceiver.enter_tx_mode()?;
        self.transceiver.write_payload(payload)?;

        let mut polls: u32 = 0;
        while !self.transceiver.tx_done()? {
            polls += 1;
            if polls >= self.max_tx_polls {
                warn!("TX-done not signaled after {} polls", self.max_tx_polls);
                return Err(RadioError::TxTimeout(self.max_tx_polls));
            }
        }

        info!("transmitted {} bytes", payload.len());
        Ok(())
    }

    pub fn config(&self) -> &RadioConfig {
        &self.config
    }

    /// Access to the owned transceiver, used by tests to inspect mocks.
    pub fn transceiver(&self) -> &T {
        &self.transceiver
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockTransceiver;
    use super::*;

    #[test]
    fn init_applies_configuration_in_driver_order() {
        let mut link = RadioLink::new(MockTransceiver::new(), RadioConfig::default(), 16);
        link.init().unwrap();

        let calls = link.transceiver.calls();
        assert_eq!(
            calls,
            vec![
                "reset".to_string(),
                "set_frequency(868000000)".to_string(),
                "set_spreading_factor(7)".to_string(),
                "set_bandwidth(125000)".to_string(),
                "set_tx_power(14)".to_string(),
            ]
        );
    }

    #[test]
    fn send_before_init_is_refused() {
        let mut link = RadioLink::new(MockTransceiver::new(), RadioConfig::default(), 16);
        assert_eq!(link.send(b"PH=0.00"), Err(RadioError::NotInitialized));
        assert!(link.transceiver.sent_payloads().is_empty());
    }

    #[test]
    fn init_then_send_without_intervening_reset() {
        let mut link = RadioLink::new(MockTransceiver::new(), RadioConfig::default(), 16);
        link.init().unwrap();
        link.send(b"PH=6.80,T=25.0").unwrap();

        let sent = link.transceiver.sent_payloads();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], b"PH=6.80,T=25.0");
    }

    #[test]
    fn stuck_transmission_times_out() {
        let mut transceiver = MockTransceiver::new();
        transceiver.set_stuck_tx(true);
        let mut link = RadioLink::new(transceiver, RadioConfig::default(), 32);
        link.init().unwrap();

        assert_eq!(link.send(b"data"), Err(RadioError::TxTimeout(32)));
    }
}
