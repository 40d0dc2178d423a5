//! The key-value contract the cart store persists through.

use async_trait::async_trait;

use crate::CacheError;

/// Result type for store operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Async key-value store holding serialized blobs.
///
/// Implementations only move opaque strings around; encoding and decoding
/// is the caller's business.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Get the blob stored under `key`.
    ///
    /// Returns `None` if the key doesn't exist.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Store `blob` under `key`, replacing any previous value.
    async fn set(&self, key: &str, blob: &str) -> CacheResult<()>;
}

#[async_trait]
impl<S: KvStore + ?Sized> KvStore for std::sync::Arc<S> {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, blob: &str) -> CacheResult<()> {
        (**self).set(key, blob).await
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// use market_cache::cache_key;
///
/// let key = cache_key!("@GoMarketplace", "cart");
/// assert_eq!(key, "@GoMarketplace:cart");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
