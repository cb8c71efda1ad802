use core::fmt::{self, Write};

use crate::core::reading::Reading;

/// Maximum radio payload size in bytes. Must match the receiving gateway's
/// buffer.
pub const MAX_PAYLOAD_LEN: usize = 128;

/// Encoded telemetry line, backed by a fixed buffer.
///
/// The encoder writes into this buffer without heap allocation; `len()` is
/// the authoritative byte count (the payload carries no terminator).
#[derive(Debug, Clone, Copy)]
pub struct Payload {
    buf: [u8; MAX_PAYLOAD_LEN],
    len: usize,
}

impl Payload {
    pub fn empty() -> Self {
        Payload {
            buf: [0u8; MAX_PAYLOAD_LEN],
            len: 0,
        }
    }

    /// The encoded bytes, exactly `len()` of them.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The encoded line as text, for logging.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

// Bounded cursor: bytes beyond the buffer capacity are dropped rather than
// reported as an error, which keeps encoding total. Field values produced by
// the sensor panel cannot reach the cap.
impl Write for Payload {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let remaining = MAX_PAYLOAD_LEN - self.len;
        let take = s.len().min(remaining);
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialize a reading into the wire line:
/// `PH=<2dp>,TUR=<2dp>,SAL=<2dp>,NH3=<2dp>,T=<1dp>`
///
/// Field order, keys and decimal precision are a compatibility contract with
/// the downstream gateway and must not change independently of it. Encoding
/// is deterministic and never fails.
pub fn encode_reading(reading: &Reading) -> Payload {
    let mut payload = Payload::empty();
    let _ = write!(
        payload,
        "PH={:.2},TUR={:.2},SAL={:.2},NH3={:.2},T={:.1}",
        reading.ph, reading.turbidity, reading.salinity, reading.ammonia, reading.temperature
    );
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reference_scenario() {
        let reading = Reading::new(6.80, 12.34, 0.55, 0.02, 25.0);
        let payload = encode_reading(&reading);
        assert_eq!(
            payload.as_bytes(),
            b"PH=6.80,TUR=12.34,SAL=0.55,NH3=0.02,T=25.0"
        );
        assert_eq!(payload.len(), 42);
    }

    #[test]
    fn encodes_all_zero_reading() {
        let reading = Reading::new(0.0, 0.0, 0.0, 0.0, 0.0);
        let payload = encode_reading(&reading);
        assert_eq!(payload.as_str(), "PH=0.00,TUR=0.00,SAL=0.00,NH3=0.00,T=0.0");
    }

    #[test]
    fn encoding_is_deterministic() {
        let reading = Reading::new(7.12, 3.4, 1.23, 0.07, 21.5);
        let first = encode_reading(&reading);
        let second = encode_reading(&reading);
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn length_matches_bytes_and_stays_bounded() {
        let reading = Reading::new(14.0, 3000.0, 35.0, 1.0, -40.0);
        let payload = encode_reading(&reading);
        assert_eq!(payload.as_bytes().len(), payload.len());
        assert!(payload.len() <= MAX_PAYLOAD_LEN);
    }

    #[test]
    fn round_trip_preserves_values_to_declared_precision() {
        let reading = Reading::new(6.804, 12.341, 0.549, 0.024, 25.04);
        let payload = encode_reading(&reading);

        let mut fields = payload.as_str().split(',');
        let mut next = |key: &str| -> f32 {
            let field = fields.next().unwrap();
            let (k, v) = field.split_once('=').unwrap();
            assert_eq!(k, key);
            v.parse().unwrap()
        };

        assert!((next("PH") - 6.80).abs() < 0.005);
        assert!((next("TUR") - 12.34).abs() < 0.005);
        assert!((next("SAL") - 0.55).abs() < 0.005);
        assert!((next("NH3") - 0.02).abs() < 0.005);
        assert!((next("T") - 25.0).abs() < 0.05);
    }

    #[test]
    fn oversized_write_truncates_instead_of_failing() {
        let mut payload = Payload::empty();
        let long = "x".repeat(MAX_PAYLOAD_LEN + 32);
        let _ = write!(payload, "{}", long);
        assert_eq!(payload.len(), MAX_PAYLOAD_LEN);
    }
}
