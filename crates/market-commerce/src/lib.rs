//! Cart domain types and the persisted cart store for GoMarketplace.
//!
//! - **Cart**: ordered, id-unique line items with immutable updates
//! - **Codec**: the JSON blob a cart is persisted as
//! - **Store**: a single task that serializes every cart operation and
//!   writes the full cart back through a [`market_cache::KvStore`]
//!
//! # Example
//!
//! ```rust,ignore
//! use market_cache::MemoryStore;
//! use market_commerce::prelude::*;
//!
//! let store = CartStore::spawn(MemoryStore::new(), CartStoreConfig::default());
//! let cart = store.handle();
//!
//! cart.add_to_cart(Product::new("p1", "Shirt", "https://img/shirt.png", 20.0)).await?;
//! cart.increment("p1").await?;
//!
//! let snapshot = cart.snapshot()?;
//! println!("{} items, subtotal {:.2}", snapshot.cart.item_count(), snapshot.cart.subtotal());
//! ```

pub mod error;
pub mod ids;

pub mod cart;
pub mod store;

pub use error::CommerceError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;

    // Cart
    pub use crate::cart::{Cart, CartChange, CartOp, LineItem, Product};

    // Store
    pub use crate::store::{CartContext, CartHandle, CartSnapshot, CartStore, CartStoreConfig};
}
