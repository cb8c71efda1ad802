/// Radio communication modules
pub mod lora;

pub use lora::{LoraTransceiver, RadioConfig, RadioError, RadioLink};
