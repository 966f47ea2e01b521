//! Ceremony Provider Module
//!
//! Defines the ceremony capability trait and the fixed parameter sets the
//! store hands to it. The configuration is effectively constant: one
//! relying party, one synthetic user, one algorithm.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::Config;

// == Ceremony Constants ==
/// Challenge length in bytes for both creation and assertion.
pub const CHALLENGE_LENGTH: usize = 32;

/// Synthetic user handle length in bytes.
pub const USER_HANDLE_LENGTH: usize = 16;

/// COSE identifier for ES256, the only accepted credential algorithm.
pub const ES256_ALGORITHM: i32 = -7;

// == Ceremony Error ==
/// Failure modes of an authentication ceremony.
///
/// The store treats every variant identically: log and degrade to "as if
/// absent". The distinction exists for providers and their own callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CeremonyError {
    /// The user dismissed the ceremony
    #[error("Ceremony was cancelled by the user")]
    Cancelled,

    /// The provider refused the request
    #[error("Ceremony rejected: {0}")]
    Rejected(String),

    /// The ceremony did not complete within its timeout
    #[error("Ceremony timed out")]
    TimedOut,
}

// == Credential ==
/// Opaque handle to a platform credential produced by a ceremony.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Provider-assigned credential identifier
    pub id: String,
}

// == Creation Options ==
/// Parameters for a credential-creation ceremony.
#[derive(Debug, Clone)]
pub struct CredentialCreationOptions {
    /// Creation challenge bytes
    pub challenge: Vec<u8>,
    /// Human-readable relying-party name
    pub relying_party_name: String,
    /// Synthetic user handle
    pub user_handle: Vec<u8>,
    /// Synthetic user name
    pub user_name: String,
    /// Synthetic user display name
    pub user_display_name: String,
    /// COSE algorithm identifier
    pub algorithm: i32,
    /// Whether the provider must verify the user's presence
    pub require_user_verification: bool,
    /// Ceremony timeout in milliseconds
    pub timeout_ms: u64,
}

impl CredentialCreationOptions {
    /// Builds the fixed creation parameters from the store configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            challenge: vec![0; CHALLENGE_LENGTH],
            relying_party_name: config.relying_party_name.clone(),
            user_handle: vec![0; USER_HANDLE_LENGTH],
            user_name: "user".to_string(),
            user_display_name: "User".to_string(),
            algorithm: ES256_ALGORITHM,
            require_user_verification: true,
            timeout_ms: config.ceremony_timeout_ms,
        }
    }
}

// == Request Options ==
/// Parameters for an assertion ceremony.
#[derive(Debug, Clone)]
pub struct CredentialRequestOptions {
    /// Assertion challenge bytes
    pub challenge: Vec<u8>,
    /// Ceremony timeout in milliseconds
    pub timeout_ms: u64,
}

impl CredentialRequestOptions {
    /// Builds the fixed assertion parameters from the store configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            challenge: vec![0; CHALLENGE_LENGTH],
            timeout_ms: config.ceremony_timeout_ms,
        }
    }
}

// == Ceremony Provider Trait ==
/// Async capability performing user-interactive authentication ceremonies.
///
/// Implementations suspend at the ceremony and resume on completion or
/// rejection. The provider enforces its own timeout; the store adds none.
#[async_trait]
pub trait CeremonyProvider: Send + Sync {
    /// Whether the platform capability is present at all.
    fn is_supported(&self) -> bool {
        true
    }

    /// Requests creation of a new credential.
    async fn create_credential(
        &self,
        options: &CredentialCreationOptions,
    ) -> Result<Credential, CeremonyError>;

    /// Requests an assertion with an existing credential.
    async fn get_credential(
        &self,
        options: &CredentialRequestOptions,
    ) -> Result<Credential, CeremonyError>;
}
