//! Store Module
//!
//! Provides the expiring, compressed key/value store and its entry codec.

mod codec;
mod envelope;
mod stats;
#[allow(clippy::module_inception)]
mod store;


// Re-export public types
pub use codec::{decode_envelope, encode_envelope};
pub use envelope::{current_timestamp_ms, Envelope};
pub use stats::StoreStats;
pub use store::Store;
