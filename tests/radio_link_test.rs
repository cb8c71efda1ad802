// Radio link contract tests
//
// The RF parameters applied at init must match the receiving gateway
// exactly; these tests pin the exported constants and the configure sequence.

use aqua_sensor_node::communication::lora::mock::MockTransceiver;
use aqua_sensor_node::communication::lora::{
    LORA_BANDWIDTH_HZ, LORA_FREQUENCY_HZ, LORA_SPREADING_FACTOR, LORA_TX_POWER_DBM,
};
use aqua_sensor_node::{RadioConfig, RadioError, RadioLink};

#[test]
fn test_exported_rf_constants() {
    assert_eq!(LORA_FREQUENCY_HZ, 868_000_000);
    assert_eq!(LORA_SPREADING_FACTOR, 7);
    assert_eq!(LORA_BANDWIDTH_HZ, 125_000);
    assert_eq!(LORA_TX_POWER_DBM, 14);

    let config = RadioConfig::default();
    assert_eq!(config.frequency_hz, LORA_FREQUENCY_HZ);
    assert_eq!(config.spreading_factor, LORA_SPREADING_FACTOR);
    assert_eq!(config.bandwidth_hz, LORA_BANDWIDTH_HZ);
    assert_eq!(config.tx_power_dbm, LORA_TX_POWER_DBM);
}

#[test]
fn test_init_configures_before_first_send() {
    let mut link = RadioLink::new(MockTransceiver::new(), RadioConfig::default(), 8);
    link.init().unwrap();
    link.send(b"PH=6.80,TUR=12.34,SAL=0.55,NH3=0.02,T=25.0")
        .unwrap();

    let calls = link.transceiver().calls();
    assert_eq!(calls[0], "reset");
    assert_eq!(
        calls[1..5].to_vec(),
        vec![
            "set_frequency(868000000)".to_string(),
            "set_spreading_factor(7)".to_string(),
            "set_bandwidth(125000)".to_string(),
            "set_tx_power(14)".to_string(),
        ]
    );
    assert_eq!(
        calls[5..].to_vec(),
        vec!["enter_tx_mode".to_string(), "write_payload(42 bytes)".to_string()]
    );
}

#[test]
fn test_link_reports_applied_configuration() {
    let mut link = RadioLink::new(MockTransceiver::new(), RadioConfig::default(), 8);
    link.init().unwrap();

    // The configuration held by the link is the one sent to the transceiver
    assert_eq!(*link.config(), RadioConfig::default());
    assert_eq!(link.config().frequency_hz, LORA_FREQUENCY_HZ);
    assert_eq!(link.config().spreading_factor, LORA_SPREADING_FACTOR);
    assert_eq!(link.config().bandwidth_hz, LORA_BANDWIDTH_HZ);
    assert_eq!(link.config().tx_power_dbm, LORA_TX_POWER_DBM);
}

#[test]
fn test_send_without_init_is_an_error() {
    let mut link = RadioLink::new(MockTransceiver::new(), RadioConfig::default(), 8);
    assert_eq!(link.send(b"x"), Err(RadioError::NotInitialized));
}

#[test]
fn test_repeated_sends_do_not_reconfigure() {
    let mut link = RadioLink::new(MockTransceiver::new(), RadioConfig::default(), 8);
    link.init().unwrap();
    link.send(b"first").unwrap();
    link.send(b"second").unwrap();

    let resets = link
        .transceiver()
        .calls()
        .iter()
        .filter(|call| call.as_str() == "reset")
        .count();
    assert_eq!(resets, 1);
    assert_eq!(link.transceiver().sent_payloads().len(), 2);
}
