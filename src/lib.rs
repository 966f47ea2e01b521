//! Packrat - an expiring, compressed key/value persistence helper
//!
//! Wraps values in a `{value, expiry}` envelope, compresses them, encodes
//! them to storable text, and writes them through one of two injected
//! key/value backends. Expiration is lazy: an expired entry is evicted by
//! the read that observes it. Optional extras: a cross-context
//! change-notification subscription and read/write paths gated behind a
//! platform authentication ceremony.

pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod store;
pub mod tasks;

pub use auth::{CeremonyError, CeremonyProvider, Credential};
pub use backend::{Area, ChangeEvent, MemoryBackend, StorageBackend};
pub use config::Config;
pub use error::{Result, StoreError};
pub use store::{Envelope, Store, StoreStats};
pub use tasks::spawn_listener_task;
