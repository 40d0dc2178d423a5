//! Key-Value persistence layer for the marketplace cart.
//!
//! Defines the [`KvStore`] contract (get/set an opaque blob by key) and two
//! backends:
//!
//! - [`MemoryStore`] - process-local map, for tests and embedding
//! - [`FileStore`] - one file per key under a directory, atomic replace on write
//!
//! # Example
//!
//! ```rust,ignore
//! use market_cache::{FileStore, KvStore};
//!
//! let store = FileStore::open("/tmp/market")?;
//!
//! // Store a value
//! store.set("@GoMarketplace:cart", "[]").await?;
//!
//! // Retrieve a value
//! let blob: Option<String> = store.get("@GoMarketplace:cart").await?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{CacheResult, KvStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CacheError, CacheResult, FileStore, KvStore, MemoryStore};
}
