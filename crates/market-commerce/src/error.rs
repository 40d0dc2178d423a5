//! Commerce error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors that can occur in cart operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Cart accessed through a handle whose store has stopped.
    #[error("Cart store is not running: cart handles must be used within the store's lifetime")]
    OutOfScope,

    /// Cart accessed from a context with no store installed.
    #[error("No active cart store: the cart must be used within a scope that provides a CartStore")]
    NoActiveStore,

    /// Persisted cart could not be parsed.
    #[error("Malformed cart data: {0}")]
    MalformedCart(String),

    /// Two line items share an id.
    #[error("Duplicate line item: {0}")]
    DuplicateItem(ProductId),

    /// A line item has quantity zero.
    #[error("Invalid quantity 0 for line item: {0}")]
    ZeroQuantity(ProductId),

    /// A price cannot be represented in the persisted format.
    #[error("Non-finite price for line item: {0}")]
    NonFinitePrice(ProductId),

    /// The store task ended abnormally.
    #[error("Cart store task failed: {0}")]
    StoreTaskFailed(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(#[from] market_cache::CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_errors_are_descriptive() {
        assert!(CommerceError::OutOfScope.to_string().contains("store's lifetime"));
        assert!(CommerceError::NoActiveStore
            .to_string()
            .contains("provides a CartStore"));
    }

    #[test]
    fn test_item_errors_name_the_id() {
        let err = CommerceError::DuplicateItem(ProductId::new("p1"));
        assert_eq!(err.to_string(), "Duplicate line item: p1");
    }
}
