//! Cart store configuration.

use serde::{Deserialize, Serialize};

/// Key the cart blob is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketplace:cart";

/// Mailbox size. Callers wait for room once this many operations are queued.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 64;

/// Configuration for a [`CartStore`](crate::store::CartStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartStoreConfig {
    /// Key the cart blob is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Number of queued operations before senders wait.
    #[serde(default = "default_mailbox_capacity")]
    pub mailbox_capacity: usize,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_mailbox_capacity() -> usize {
    DEFAULT_MAILBOX_CAPACITY
}

impl Default for CartStoreConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            mailbox_capacity: default_mailbox_capacity(),
        }
    }
}

impl CartStoreConfig {
    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the mailbox capacity. Zero is bumped to 1.
    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity;
        self
    }

    pub(crate) fn effective_capacity(&self) -> usize {
        self.mailbox_capacity.max(1)
    }
}
