//! Envelope Module
//!
//! Defines the `{value, expiry}` structure actually persisted.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Envelope ==
/// The persisted wrapper around a stored value.
///
/// Immutable once written: every set fully replaces the envelope at its key.
/// Field order matters on the wire, `value` is always serialized before
/// `expiry` so encoded entries stay byte-compatible across writers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// The stored payload
    pub value: Value,
    /// Expiration timestamp (Unix milliseconds), None = never expires
    #[serde(default)]
    pub expiry: Option<i64>,
}

impl Envelope {
    // == Constructor ==
    /// Creates an envelope expiring `ttl_millis` from now, or never.
    pub fn new(value: Value, ttl_millis: Option<i64>) -> Self {
        Self {
            value,
            expiry: ttl_millis.map(|ttl| current_timestamp_ms() + ttl),
        }
    }

    // == Is Expired ==
    /// Checks whether the envelope has expired.
    ///
    /// An envelope is expired once the current time reaches its expiry
    /// timestamp; an envelope without one never expires.
    pub fn is_expired(&self) -> bool {
        match self.expiry {
            Some(expiry) => current_timestamp_ms() >= expiry,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining lifetime in milliseconds, or None if unbounded.
    ///
    /// Returns `Some(0)` once expired.
    pub fn ttl_remaining_ms(&self) -> Option<i64> {
        self.expiry.map(|expiry| {
            let now = current_timestamp_ms();
            if expiry > now {
                expiry - now
            } else {
                0
            }
        })
    }
}

// == Utility Functions ==
/// Returns the current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}
