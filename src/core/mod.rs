/// Application core modules
pub mod config;
pub mod duty_cycle;
pub mod payload;
pub mod reading;

pub use config::{AppConfig, ConfigError};
pub use duty_cycle::{CycleError, DutyCycleController};
pub use payload::{encode_reading, Payload, MAX_PAYLOAD_LEN};
pub use reading::Reading;
