//! Store Module
//!
//! The expiring, compressed key/value store. Composes two injected storage
//! backends, the DEFLATE/base64 entry codec, and an optional authentication
//! ceremony provider into a single read/write/remove/clear/listen/protect
//! API.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::auth::{
    CeremonyProvider, CredentialCreationOptions, CredentialRequestOptions,
};
use crate::backend::{Area, MemoryBackend, StorageBackend};
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::store::{codec, Envelope, StoreStats};
use crate::tasks::spawn_listener_task;

// == Store ==
/// Expiring, compressed key/value store over two injected backends.
///
/// Entries are wrapped in an [`Envelope`], serialized to JSON, compressed,
/// base64-encoded, and written as text. Expiration is lazy: an expired entry
/// is evicted by the `get` that observes it; there is no background sweep.
pub struct Store {
    /// Persistent-area backend
    local: Box<dyn StorageBackend>,
    /// Session-scoped backend
    session: Box<dyn StorageBackend>,
    /// Optional ceremony capability for the protected read/write paths
    auth: Option<Box<dyn CeremonyProvider>>,
    /// Codec and ceremony parameters
    config: Config,
    /// Read-path counters
    stats: StoreStats,
}

impl Store {
    // == Constructors ==
    /// Creates a store over the two given backends with default configuration.
    pub fn new(local: Box<dyn StorageBackend>, session: Box<dyn StorageBackend>) -> Self {
        Self::with_config(local, session, Config::default())
    }

    /// Creates a store over the two given backends with explicit configuration.
    pub fn with_config(
        local: Box<dyn StorageBackend>,
        session: Box<dyn StorageBackend>,
        config: Config,
    ) -> Self {
        Self {
            local,
            session,
            auth: None,
            config,
            stats: StoreStats::new(),
        }
    }

    /// Creates a store backed by two fresh in-memory areas.
    pub fn in_memory() -> Self {
        let config = Config::default();
        let capacity = config.channel_capacity;
        Self::with_config(
            Box::new(MemoryBackend::with_channel_capacity(capacity)),
            Box::new(MemoryBackend::with_channel_capacity(capacity)),
            config,
        )
    }

    /// Attaches an authentication ceremony provider.
    pub fn with_auth(mut self, provider: Box<dyn CeremonyProvider>) -> Self {
        self.auth = Some(provider);
        self
    }

    /// Returns the backend for the given area.
    fn backend(&self, area: Area) -> &dyn StorageBackend {
        match area {
            Area::Local => self.local.as_ref(),
            Area::Session => self.session.as_ref(),
        }
    }

    // == Set ==
    /// Stores a value under `key` in the selected area.
    ///
    /// The value is wrapped in an envelope expiring `ttl_millis` from now
    /// (or never), then serialized, compressed, and base64-encoded. Any
    /// prior entry at `key` is fully replaced.
    ///
    /// # Errors
    /// [`StoreError::Serialization`] if the value cannot be represented as
    /// JSON. This is the loud path; it is never swallowed.
    pub fn set<T: Serialize>(
        &mut self,
        key: &str,
        value: &T,
        area: Area,
        ttl_millis: Option<i64>,
    ) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|err| StoreError::Serialization(err.to_string()))?;

        let envelope = Envelope::new(value, ttl_millis);
        let encoded = codec::encode_envelope(&envelope, self.config.compression_level)?;

        self.backend(area).set_item(key, &encoded);
        debug!(key, %area, "stored entry");
        Ok(())
    }

    // == Get ==
    /// Retrieves the value under `key` from the selected area.
    ///
    /// Returns None when the key is absent, when the entry has expired (the
    /// entry is evicted as a side effect), or when the stored text cannot be
    /// decoded. Corrupted entries are unrecoverable, so they are reported
    /// and treated as absent rather than surfaced as errors.
    pub fn get<T: DeserializeOwned>(&mut self, key: &str, area: Area) -> Option<T> {
        let stored = self.backend(area).get_item(key);
        let Some(text) = stored else {
            self.stats.record_miss();
            return None;
        };

        let envelope = match codec::decode_envelope(&text) {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(key, %area, error = %err, "discarding unreadable entry");
                self.stats.record_corrupt();
                return None;
            }
        };

        if envelope.is_expired() {
            self.backend(area).remove_item(key);
            debug!(key, %area, "evicted expired entry");
            self.stats.record_expired();
            return None;
        }

        match serde_json::from_value(envelope.value) {
            Ok(value) => {
                self.stats.record_hit();
                Some(value)
            }
            Err(err) => {
                warn!(key, %area, error = %err, "stored value has unexpected shape");
                self.stats.record_corrupt();
                None
            }
        }
    }

    // == Remove ==
    /// Deletes `key` from the selected area; no-op if absent.
    pub fn remove(&self, key: &str, area: Area) {
        self.backend(area).remove_item(key);
    }

    // == Clear ==
    /// Deletes every key from the selected area.
    ///
    /// This wipes the whole backend, not only keys written through this
    /// store. Callers sharing a backend with other writers lose those
    /// entries too; that breadth is part of the contract.
    pub fn clear(&self, area: Area) {
        self.backend(area).clear();
    }

    // == Listen ==
    /// Subscribes to cross-context change notifications.
    ///
    /// Only the persistent area carries a notification stream, and only
    /// writes from other execution contexts fire on it. The callback
    /// receives the key and the raw stored text parsed as JSON; the text is
    /// not routed through the decompression pipeline, so listeners observe
    /// remote writes in their stored form. Events whose text does not parse
    /// are reported and skipped.
    ///
    /// Returns the handle of the drain task, or None when the persistent
    /// backend exposes no stream. There is no unsubscribe beyond aborting
    /// the handle; the subscription otherwise lives until the backend is
    /// dropped.
    pub fn listen<F>(&self, callback: F) -> Option<JoinHandle<()>>
    where
        F: Fn(String, serde_json::Value) + Send + 'static,
    {
        let receiver = self.local.subscribe()?;
        Some(spawn_listener_task(receiver, callback))
    }

    // == Protect With Biometrics ==
    /// Stores a value only after a successful credential-creation ceremony.
    ///
    /// On ceremony success this is a plain [`Store::set`] with no expiry.
    /// On ceremony failure or cancellation the failure is reported and
    /// nothing is written; from the caller's perspective the call completes
    /// normally.
    ///
    /// # Errors
    /// [`StoreError::UnsupportedPlatform`] when no ceremony provider is
    /// available, [`StoreError::Serialization`] from the underlying set.
    pub async fn protect_with_biometrics<T: Serialize>(
        &mut self,
        key: &str,
        value: &T,
        area: Area,
    ) -> Result<()> {
        let provider = self.ceremony_provider()?;
        let options = CredentialCreationOptions::from_config(&self.config);
        let outcome = provider.create_credential(&options).await;

        match outcome {
            Ok(credential) => {
                debug!(key, credential = %credential.id, "ceremony succeeded, storing entry");
                self.set(key, value, area, None)
            }
            Err(err) => {
                warn!(key, error = %err, "authentication ceremony failed");
                Ok(())
            }
        }
    }

    // == Retrieve With Biometrics ==
    /// Retrieves a value only after a successful assertion ceremony.
    ///
    /// On ceremony success this is a plain [`Store::get`]. On ceremony
    /// failure the failure is reported and None is returned.
    ///
    /// # Errors
    /// [`StoreError::UnsupportedPlatform`] when no ceremony provider is
    /// available.
    pub async fn retrieve_with_biometrics<T: DeserializeOwned>(
        &mut self,
        key: &str,
        area: Area,
    ) -> Result<Option<T>> {
        let provider = self.ceremony_provider()?;
        let options = CredentialRequestOptions::from_config(&self.config);
        let outcome = provider.get_credential(&options).await;

        match outcome {
            Ok(_) => Ok(self.get(key, area)),
            Err(err) => {
                warn!(key, error = %err, "authentication ceremony failed");
                Ok(None)
            }
        }
    }

    /// Returns the ceremony provider, or the unsupported-platform error.
    fn ceremony_provider(&self) -> Result<&dyn CeremonyProvider> {
        match self.auth.as_deref() {
            Some(provider) if provider.is_supported() => Ok(provider),
            _ => Err(StoreError::UnsupportedPlatform),
        }
    }

    // == Stats ==
    /// Returns the read-path counters accumulated so far.
    pub fn stats(&self) -> StoreStats {
        self.stats.clone()
    }
}
