//! Storage Backend Module
//!
//! Defines the key/value backend capability the store writes through, the
//! area flag selecting between the two injected backend instances, and the
//! change-notification event carried by a backend's broadcast stream.

mod memory;

use std::fmt;
use std::sync::Arc;

use tokio::sync::broadcast;

pub use memory::MemoryBackend;

// == Area ==
/// Selects between the two equivalent key/value backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    /// Persistent area, survives across sessions
    Local,
    /// Session-scoped area, cleared when the session ends
    Session,
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Area::Local => f.write_str("local"),
            Area::Session => f.write_str("session"),
        }
    }
}

// == Change Event ==
/// A write observed in another execution context.
///
/// `new_value` is `None` for removal notifications; listeners that only care
/// about writes filter those out.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    /// The key that changed
    pub key: String,
    /// The raw stored text after the change, or None for a removal
    pub new_value: Option<String>,
}

// == Storage Backend Trait ==
/// Synchronous key/value backend capability.
///
/// Both areas are injected as explicit instances of this trait so callers and
/// tests can substitute their own backends. Implementations serialize
/// same-context access internally; the trait therefore takes `&self`
/// throughout.
pub trait StorageBackend: Send + Sync {
    /// Returns the stored text for `key`, or None if absent.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous entry.
    fn set_item(&self, key: &str, value: &str);

    /// Deletes `key`; no-op if absent.
    fn remove_item(&self, key: &str);

    /// Deletes every key in the backend.
    fn clear(&self);

    /// Subscribes to the backend's change-notification stream.
    ///
    /// Events fire only for changes originating in another execution
    /// context. Returns None for backends without a notification stream.
    fn subscribe(&self) -> Option<broadcast::Receiver<ChangeEvent>> {
        None
    }
}

// Shared handles count as backends too, so a test can keep a reference to a
// backend it has already moved into a store.
impl<B: StorageBackend + ?Sized> StorageBackend for Arc<B> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) {
        (**self).remove_item(key)
    }

    fn clear(&self) {
        (**self).clear()
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<ChangeEvent>> {
        (**self).subscribe()
    }
}
