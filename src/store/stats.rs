//! Store Statistics Module
//!
//! Tracks read-path outcomes: hits, misses, expired evictions, and corrupt
//! entries discarded.

use serde::Serialize;

// == Store Stats ==
/// Read-path counters for a store.
///
/// `misses` counts every get that returned nothing, including the expired
/// and corrupt cases; `expired` and `corrupt` break those out.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Number of successful retrievals
    pub hits: u64,
    /// Number of retrievals that returned nothing
    pub misses: u64,
    /// Number of entries evicted because their expiry had passed
    pub expired: u64,
    /// Number of unreadable entries discarded
    pub corrupt: u64,
}

impl StoreStats {
    // == Constructor ==
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have happened.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Expired ==
    /// Increments the expired counter; an expired read is also a miss.
    pub fn record_expired(&mut self) {
        self.expired += 1;
        self.misses += 1;
    }

    // == Record Corrupt ==
    /// Increments the corrupt counter; a corrupt read is also a miss.
    pub fn record_corrupt(&mut self) {
        self.corrupt += 1;
        self.misses += 1;
    }
}
