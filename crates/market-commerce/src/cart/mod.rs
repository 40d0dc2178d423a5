//! Shopping cart module.
//!
//! Contains the cart, line item and product types, and the blob codec used
//! to persist a cart.

mod cart;
pub mod codec;

pub use cart::{Cart, CartChange, CartOp, LineItem, Product};
