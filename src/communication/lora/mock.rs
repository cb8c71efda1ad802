use crate::communication::lora::{LoraTransceiver, RadioError};

/// Scripted transceiver for host tests.
///
/// Records every driver call in order and captures written payloads so tests
/// can verify the configure/transmit sequences.
#[derive(Debug, Default)]
pub struct MockTransceiver {
    calls: Vec<String>,
    sent: Vec<Vec<u8>>,
    /// When set, `tx_done` never reports completion.
    stuck_tx: bool,
    /// When set, every bus access fails.
    fail_bus: bool,
    tx_pending: bool,
}

impl MockTransceiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded driver calls, in invocation order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.clone()
    }

    /// Payloads handed to `write_payload`.
    pub fn sent_payloads(&self) -> Vec<Vec<u8>> {
        self.sent.clone()
    }

    /// Simulate a transmission that never completes.
    pub fn set_stuck_tx(&mut self, stuck: bool) {
        self.stuck_tx = stuck;
    }

    /// Simulate a broken SPI bus.
    pub fn set_bus_failure(&mut self, fail: bool) {
        self.fail_bus = fail;
    }

    fn record(&mut self, call: String) -> Result<(), RadioError> {
        if self.fail_bus {
            return Err(RadioError::Bus("simulated bus failure".to_string()));
        }
        self.calls.push(call);
        Ok(())
    }
}

impl LoraTransceiver for MockTransceiver {
    fn reset(&mut self) -> Result<(), RadioError> {
        self.tx_pending = false;
        self.record("reset".to_string())
    }

    fn set_frequency(&mut self, hz: u32) -> Result<(), RadioError> {
        self.record(format!("set_frequency({})", hz))
    }

    fn set_spreading_factor(&mut self, sf: u8) -> Result<(), RadioError> {
        self.record(format!("set_spreading_factor({})", sf))
    }

    fn set_bandwidth(&mut self, hz: u32) -> Result<(), RadioError> {
        self.record(format!("set_bandwidth({})", hz))
    }

    fn set_tx_power(&mut self, dbm: i8) -> Result<(), RadioError> {
        self.record(format!("set_tx_power({})", dbm))
    }

    fn enter_tx_mode(&mut self) -> Result<(), RadioError> {
        self.record("enter_tx_mode".to_string())
    }

    fn write_payload(&mut self, data: &[u8]) -> Result<(), RadioError> {
        self.record(format!("write_payload({} bytes)", data.len()))?;
        self.sent.push(data.to_vec());
        self.tx_pending = true;
        Ok(())
    }

    fn tx_done(&mut self) -> Result<bool, RadioError> {
        if self.fail_bus {
            return Err(RadioError::Bus("simulated bus failure".to_string()));
        }
        if self.stuck_tx {
            return Ok(false);
        }
        let done = self.tx_pending;
        self.tx_pending = false;
        Ok(done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_calls_in_order() {
        let mut mock = MockTransceiver::new();
        mock.reset().unwrap();
        mock.set_frequency(868_000_000).unwrap();
        mock.enter_tx_mode().unwrap();

        assert_eq!(
            mock.calls(),
            vec!["reset", "set_frequency(868000000)", "enter_tx_mode"]
        );
    }

    #[test]
    fn test_mock_captures_payload_bytes() {
        let mut mock = MockTransceiver::new();
        mock.write_payload(b"PH=6.80").unwrap();
        assert_eq!(mock.sent_payloads(), vec![b"PH=6.80".to_vec()]);
        assert!(mock.tx_done().unwrap());
    }

    #[test]
    fn test_mock_bus_failure() {
        let mut mock = MockTransceiver::new();
        mock.set_bus_failure(true);
        assert!(matches!(mock.reset(), Err(RadioError::Bus(_))));
    }

    #[test]
    fn test_mock_stuck_tx_never_completes() {
        let mut mock = MockTransceiver::new();
        mock.set_stuck_tx(true);
        mock.write_payload(b"data").unwrap();
        assert!(!mock.tx_done().unwrap());
        assert!(!mock.tx_done().unwrap());
    }
}
