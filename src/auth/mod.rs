//! Authentication Ceremony Module
//!
//! Models the platform credential ceremony as an injected async capability.
//! A ceremony is a user-interactive credential creation or assertion; the
//! store gates its protected read/write paths behind one.

mod provider;

pub use provider::{
    CeremonyError, CeremonyProvider, Credential, CredentialCreationOptions,
    CredentialRequestOptions, CHALLENGE_LENGTH, ES256_ALGORITHM, USER_HANDLE_LENGTH,
};
