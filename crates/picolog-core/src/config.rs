//! Device settings, decodable from a blob persisted by the hardware
//! layer (flash on the device, nothing in the simulator).

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Identifier reported by `HELO`, rendered as eight hex digits.
    pub device_id: u32,
    /// Idle timeout for each byte read while draining a block, in
    /// microseconds.
    pub read_timeout_us: u64,
    /// Fixed idle delay at the end of every cycle, in milliseconds.
    pub cycle_delay_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_id: 0xE661_41A7,
            read_timeout_us: 100,
            cycle_delay_ms: 500,
        }
    }
}

impl DeviceConfig {
    /// Decode a persisted config blob, falling back to defaults when the
    /// blob is absent or malformed. A bad blob is logged, not fatal.
    pub fn load(blob: Option<&[u8]>) -> Self {
        match blob {
            Some(bytes) => match Self::from_bytes(bytes) {
                Ok(config) => config,
                Err(e) => {
                    warn!("config blob rejected ({e}); using defaults");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        Ok(postcard::from_bytes(bytes)?)
    }

    pub fn to_bytes(&self) -> Result<alloc::vec::Vec<u8>, ConfigError> {
        Ok(postcard::to_allocvec(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_without_blob_uses_defaults() {
        let config = DeviceConfig::load(None);
        assert_eq!(config, DeviceConfig::default());
        assert_eq!(config.read_timeout_us, 100);
        assert_eq!(config.cycle_delay_ms, 500);
    }

    #[test]
    fn test_load_with_malformed_blob_falls_back_to_defaults() {
        let config = DeviceConfig::load(Some(&[0xFF; 3]));
        assert_eq!(config, DeviceConfig::default());
    }

    #[test]
    fn test_persisted_blob_round_trips() {
        let config = DeviceConfig {
            device_id: 0x1234_ABCD,
            read_timeout_us: 250,
            cycle_delay_ms: 100,
        };
        let blob = config.to_bytes().unwrap();
        assert_eq!(DeviceConfig::from_bytes(&blob).unwrap(), config);
    }
}
