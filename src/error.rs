//! Error types for the storage helper
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

use crate::auth::CeremonyError;

// == Store Error Enum ==
/// Unified error type for the storage helper.
///
/// Write-path errors are loud: [`StoreError::Serialization`] and
/// [`StoreError::UnsupportedPlatform`] propagate to the caller. Read-path
/// errors are quiet: [`StoreError::CorruptEntry`] and [`StoreError::Ceremony`]
/// are logged internally and surface only as an absent value.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Value could not be serialized for storage
    #[error("Failed to serialize value: {0}")]
    Serialization(String),

    /// Stored entry could not be decoded, decompressed, or parsed
    #[error("Corrupt stored entry: {0}")]
    CorruptEntry(String),

    /// No authentication ceremony provider is available
    #[error("Platform authentication is not available")]
    UnsupportedPlatform,

    /// Authentication ceremony was rejected or cancelled
    #[error("Authentication ceremony failed: {0}")]
    Ceremony(#[from] CeremonyError),
}

// == Result Type Alias ==
/// Convenience Result type for the storage helper.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::Serialization("bad value".to_string());
        assert!(err.to_string().contains("bad value"));

        let err = StoreError::CorruptEntry("not base64".to_string());
        assert!(err.to_string().contains("not base64"));

        let err = StoreError::UnsupportedPlatform;
        assert!(err.to_string().contains("not available"));
    }

    #[test]
    fn test_ceremony_error_conversion() {
        let err: StoreError = CeremonyError::Cancelled.into();
        assert!(matches!(err, StoreError::Ceremony(_)));
    }
}
