//! Cart store counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counters recorded by the cart store.
///
/// Shared behind an `Arc`; every method takes `&self`.
#[derive(Debug, Default)]
pub struct StoreMetrics {
    loads: AtomicU64,
    load_failures: AtomicU64,
    malformed_blobs: AtomicU64,
    mutations: AtomicU64,
    writes: AtomicU64,
    write_failures: AtomicU64,
}

/// Point-in-time copy of [`StoreMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Completed startup loads.
    pub loads: u64,
    /// Loads where the backend read failed.
    pub load_failures: u64,
    /// Loads where the blob could not be decoded.
    pub malformed_blobs: u64,
    /// Mutations applied (including no-ops).
    pub mutations: u64,
    /// Successful blob writes.
    pub writes: u64,
    /// Failed blob writes.
    pub write_failures: u64,
}

impl StoreMetrics {
    /// Create a zeroed set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed startup load.
    pub fn record_load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a startup load whose backend read failed.
    pub fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a persisted blob that could not be decoded.
    pub fn record_malformed_blob(&self) {
        self.malformed_blobs.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an applied cart operation.
    pub fn record_mutation(&self) {
        self.mutations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of a blob write.
    pub fn record_write(&self, ok: bool) {
        if ok {
            self.writes.fetch_add(1, Ordering::Relaxed);
        } else {
            self.write_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Copy the current counter values.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            loads: self.loads.load(Ordering::Relaxed),
            load_failures: self.load_failures.load(Ordering::Relaxed),
            malformed_blobs: self.malformed_blobs.load(Ordering::Relaxed),
            mutations: self.mutations.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            write_failures: self.write_failures.load(Ordering::Relaxed),
        }
    }
}

impl MetricsSnapshot {
    /// Format as JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Format as a one-line summary.
    pub fn to_summary(&self) -> String {
        format!(
            "loads={} load_failures={} malformed={} mutations={} writes={} write_failures={}",
            self.loads,
            self.load_failures,
            self.malformed_blobs,
            self.mutations,
            self.writes,
            self.write_failures
        )
    }
}
