//! In-Memory Backend Module
//!
//! HashMap-backed implementation of the storage backend capability, used as
//! the default area pair and as the substitute backend in tests.

use std::collections::HashMap;
use std::sync::RwLock;

use tokio::sync::broadcast;

use crate::backend::{ChangeEvent, StorageBackend};

/// Default buffer capacity of the change-notification channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

// == Memory Backend ==
/// In-memory key/value backend with a change-notification stream.
///
/// Writes performed through [`StorageBackend::set_item`] model same-context
/// writes and do not notify subscribers. Writes performed through
/// [`MemoryBackend::write_external`] model writes from another execution
/// context and are broadcast to every subscriber, matching the platform
/// semantics the persistent area exposes.
#[derive(Debug)]
pub struct MemoryBackend {
    /// Key-value storage
    entries: RwLock<HashMap<String, String>>,
    /// Change-notification channel for cross-context writes
    changes: broadcast::Sender<ChangeEvent>,
}

impl MemoryBackend {
    // == Constructor ==
    /// Creates an empty backend with the default notification buffer.
    pub fn new() -> Self {
        Self::with_channel_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates an empty backend with the given notification buffer capacity.
    pub fn with_channel_capacity(capacity: usize) -> Self {
        let (changes, _) = broadcast::channel(capacity);
        Self {
            entries: RwLock::new(HashMap::new()),
            changes,
        }
    }

    // == External Writes ==
    /// Stores `value` under `key` as if written by another execution context.
    ///
    /// Subscribers are notified; same-context readers observe the new value
    /// on their next read.
    pub fn write_external(&self, key: &str, value: &str) {
        self.entries
            .write()
            .expect("storage lock poisoned")
            .insert(key.to_string(), value.to_string());

        // No subscribers is fine, the notification is best-effort
        let _ = self.changes.send(ChangeEvent {
            key: key.to_string(),
            new_value: Some(value.to_string()),
        });
    }

    /// Removes `key` as if removed by another execution context.
    pub fn remove_external(&self, key: &str) {
        self.entries
            .write()
            .expect("storage lock poisoned")
            .remove(key);

        let _ = self.changes.send(ChangeEvent {
            key: key.to_string(),
            new_value: None,
        });
    }

    // == Length ==
    /// Returns the current number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().expect("storage lock poisoned").len()
    }

    // == Is Empty ==
    /// Returns true if the backend holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .expect("storage lock poisoned")
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.entries
            .write()
            .expect("storage lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.entries
            .write()
            .expect("storage lock poisoned")
            .remove(key);
    }

    fn clear(&self) {
        self.entries.write().expect("storage lock poisoned").clear();
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<ChangeEvent>> {
        Some(self.changes.subscribe())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_set_and_get() {
        let backend = MemoryBackend::new();

        backend.set_item("key1", "value1");
        assert_eq!(backend.get_item("key1"), Some("value1".to_string()));
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn test_backend_get_nonexistent() {
        let backend = MemoryBackend::new();
        assert!(backend.get_item("missing").is_none());
    }

    #[test]
    fn test_backend_overwrite() {
        let backend = MemoryBackend::new();

        backend.set_item("key1", "value1");
        backend.set_item("key1", "value2");

        assert_eq!(backend.get_item("key1"), Some("value2".to_string()));
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn test_backend_remove() {
        let backend = MemoryBackend::new();

        backend.set_item("key1", "value1");
        backend.remove_item("key1");

        assert!(backend.get_item("key1").is_none());
        assert!(backend.is_empty());
    }

    #[test]
    fn test_backend_remove_nonexistent() {
        let backend = MemoryBackend::new();
        // No-op, must not panic
        backend.remove_item("missing");
    }

    #[test]
    fn test_backend_clear() {
        let backend = MemoryBackend::new();

        backend.set_item("key1", "value1");
        backend.set_item("key2", "value2");
        backend.clear();

        assert!(backend.is_empty());

        // Idempotent
        backend.clear();
        assert!(backend.is_empty());
    }

    #[test]
    fn test_local_write_does_not_notify() {
        let backend = MemoryBackend::new();
        let mut receiver = backend.subscribe().unwrap();

        backend.set_item("key1", "value1");

        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_external_write_notifies() {
        let backend = MemoryBackend::new();
        let mut receiver = backend.subscribe().unwrap();

        backend.write_external("key1", "value1");

        let event = receiver.try_recv().unwrap();
        assert_eq!(event.key, "key1");
        assert_eq!(event.new_value, Some("value1".to_string()));

        // The write is also visible to same-context reads
        assert_eq!(backend.get_item("key1"), Some("value1".to_string()));
    }

    #[test]
    fn test_external_remove_notifies_with_none() {
        let backend = MemoryBackend::new();
        backend.set_item("key1", "value1");

        let mut receiver = backend.subscribe().unwrap();
        backend.remove_external("key1");

        let event = receiver.try_recv().unwrap();
        assert_eq!(event.key, "key1");
        assert!(event.new_value.is_none());
        assert!(backend.get_item("key1").is_none());
    }
}
