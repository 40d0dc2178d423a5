//! Scoped access to the cart for application code.

use crate::error::CommerceError;
use crate::store::{CartHandle, CartStore};

/// Carries the cart store, if any, to the code that needs it.
///
/// Application code asks the context for the cart instead of holding a store
/// directly; asking a context with no store installed, or whose store has
/// stopped, fails right away.
#[derive(Debug, Clone, Default)]
pub struct CartContext {
    cart: Option<CartHandle>,
}

impl CartContext {
    /// A context with no store installed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A context providing `store`.
    pub fn provide(store: &CartStore) -> Self {
        Self::with_handle(store.handle())
    }

    /// A context providing an existing handle.
    pub fn with_handle(handle: CartHandle) -> Self {
        Self { cart: Some(handle) }
    }

    /// The cart handle.
    ///
    /// Returns [`CommerceError::NoActiveStore`] when nothing was provided and
    /// [`CommerceError::OutOfScope`] when the provided store has stopped.
    pub fn cart(&self) -> Result<&CartHandle, CommerceError> {
        let handle = self.cart.as_ref().ok_or(CommerceError::NoActiveStore)?;
        if !handle.is_active() {
            return Err(CommerceError::OutOfScope);
        }
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CartStoreConfig;
    use market_cache::MemoryStore;

    #[test]
    fn test_empty_context_has_no_cart() {
        let ctx = CartContext::empty();
        assert!(matches!(ctx.cart(), Err(CommerceError::NoActiveStore)));
    }

    #[tokio::test]
    async fn test_provided_context_yields_cart() {
        let store = CartStore::spawn(MemoryStore::new(), CartStoreConfig::default());
        let ctx = CartContext::provide(&store);

        let cart = ctx.cart().unwrap();
        cart.add_to_cart(crate::cart::Product::new("p1", "Shirt", "u", 20.0))
            .await
            .unwrap();
        assert_eq!(cart.items().await.unwrap().len(), 1);

        store.shutdown().await.unwrap();
        assert!(matches!(ctx.cart(), Err(CommerceError::OutOfScope)));
    }
}
