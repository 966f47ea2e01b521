//! Configuration Module
//!
//! Handles loading and managing storage helper configuration from
//! environment variables.

use std::env;

/// Storage helper configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// DEFLATE compression level (0-9) for stored entries
    pub compression_level: u32,
    /// Relying-party name presented during credential creation
    pub relying_party_name: String,
    /// Authentication ceremony timeout in milliseconds
    pub ceremony_timeout_ms: u64,
    /// Buffer capacity of the change-notification channel
    pub channel_capacity: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PACKRAT_COMPRESSION_LEVEL` - DEFLATE level, 0-9 (default: 6)
    /// - `PACKRAT_RP_NAME` - Relying-party name (default: "packrat")
    /// - `PACKRAT_CEREMONY_TIMEOUT_MS` - Ceremony timeout (default: 60000)
    /// - `PACKRAT_CHANNEL_CAPACITY` - Notification buffer size (default: 64)
    pub fn from_env() -> Self {
        Self {
            compression_level: env::var("PACKRAT_COMPRESSION_LEVEL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v <= 9)
                .unwrap_or(6),
            relying_party_name: env::var("PACKRAT_RP_NAME")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "packrat".to_string()),
            ceremony_timeout_ms: env::var("PACKRAT_CEREMONY_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60_000),
            channel_capacity: env::var("PACKRAT_CHANNEL_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(64),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            compression_level: 6,
            relying_party_name: "packrat".to_string(),
            ceremony_timeout_ms: 60_000,
            channel_capacity: 64,
        }
    }
}
