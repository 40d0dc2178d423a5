//! The cart store: a task owning the cart, persisting it after every change.
//!
//! - [`CartStore`] - owner; starts the task, ends its lifetime
//! - [`CartHandle`] - cloneable access for consumers
//! - [`CartContext`] - scoped access point with a presence check
//! - [`CartSnapshot`] - what consumers read and subscribe to

mod actor;
mod config;
mod context;
mod handle;

pub use config::{CartStoreConfig, DEFAULT_MAILBOX_CAPACITY, DEFAULT_STORAGE_KEY};
pub use context::CartContext;
pub use handle::{CartHandle, CartSnapshot, CartStore};
