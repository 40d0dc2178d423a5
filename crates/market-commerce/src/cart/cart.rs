//! Cart and line item types.
//!
//! A [`Cart`] is never mutated in place: every operation builds the next
//! cart from the current one, so a published snapshot can't change under a
//! reader.

use std::collections::HashSet;

use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product offered to the cart. A [`LineItem`] without a quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Product identifier, the cart's identity key.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Image reference. `imageUrl` is accepted on input.
    #[serde(alias = "imageUrl")]
    pub image_url: String,
    /// Unit price.
    pub price: f64,
}

impl Product {
    /// Create a new product descriptor.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }
}

/// One product's presence in the cart.
///
/// Serializes to exactly five fields: `id`, `title`, `image_url`, `price`,
/// `quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Image reference. `imageUrl` is accepted on input.
    #[serde(alias = "imageUrl")]
    pub image_url: String,
    /// Unit price.
    pub price: f64,
    /// Quantity, always at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item for a product with quantity 1.
    pub fn from_product(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            image_url: product.image_url,
            price: product.price,
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A cart mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum CartOp {
    /// Append the product, or increment it if already present.
    Add(Product),
    /// Raise an item's quantity by one.
    Increment(ProductId),
    /// Lower an item's quantity by one, never below 1.
    Decrement(ProductId),
}

impl CartOp {
    /// Operation name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add_to_cart",
            Self::Increment(_) => "increment",
            Self::Decrement(_) => "decrement",
        }
    }

    /// The product id the operation targets.
    pub fn target(&self) -> &ProductId {
        match self {
            Self::Add(product) => &product.id,
            Self::Increment(id) | Self::Decrement(id) => id,
        }
    }
}

/// What an operation did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new item was appended with quantity 1.
    Appended,
    /// An existing item's quantity went up to the given value.
    Incremented(u32),
    /// An existing item's quantity went down to the given value.
    Decremented(u32),
    /// Nothing changed: unknown id, quantity already 1, or quantity at its ceiling.
    Unchanged,
}

/// An ordered, id-unique list of line items.
///
/// Order is first-insertion order; quantity changes update items in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(into = "Vec<LineItem>", try_from = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CommerceError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Cart::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from items, checking id uniqueness and quantities.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.quantity == 0 {
                return Err(CommerceError::ZeroQuantity(item.id.clone()));
            }
            if !seen.insert(&item.id) {
                return Err(CommerceError::DuplicateItem(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consume the cart and return its items.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Get an item by product ID.
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.position(id).is_some()
    }

    /// Get number of unique items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Apply an operation, returning the next cart and what changed.
    pub fn apply(&self, op: &CartOp) -> (Cart, CartChange) {
        match op {
            CartOp::Add(product) => self.with_added(product),
            CartOp::Increment(id) => self.with_incremented(id),
            CartOp::Decrement(id) => self.with_decremented(id),
        }
    }

    /// Next cart with `product` added.
    ///
    /// An id already in the cart is routed to [`Cart::with_incremented`];
    /// the stored title, image and price are kept.
    pub fn with_added(&self, product: &Product) -> (Cart, CartChange) {
        if self.contains(&product.id) {
            return self.with_incremented(&product.id);
        }

        let mut items = self.items.clone();
        items.push(LineItem::from_product(product.clone()));
        (Cart { items }, CartChange::Appended)
    }

    /// Next cart with the item's quantity raised by one.
    pub fn with_incremented(&self, id: &ProductId) -> (Cart, CartChange) {
        self.with_quantity(id, |q| q.checked_add(1).map(CartChange::Incremented))
    }

    /// Next cart with the item's quantity lowered by one, flooring at 1.
    pub fn with_decremented(&self, id: &ProductId) -> (Cart, CartChange) {
        self.with_quantity(id, |q| (q > 1).then(|| CartChange::Decremented(q - 1)))
    }

    fn with_quantity<F>(&self, id: &ProductId, step: F) -> (Cart, CartChange)
    where
        F: FnOnce(u32) -> Option<CartChange>,
    {
        let Some(index) = self.position(id) else {
            return (self.clone(), CartChange::Unchanged);
        };

        let mut items = self.items.clone();
        let item = &mut items[index];
        match step(item.quantity) {
            Some(change @ (CartChange::Incremented(q) | CartChange::Decremented(q))) => {
                item.quantity = q;
                (Cart { items }, change)
            }
            _ => (self.clone(), CartChange::Unchanged),
        }
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|i| &i.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shirt() -> Product {
        Product::new("p1", "Shirt", "u", 20.0)
    }

    fn cart_with(qty: u32) -> Cart {
        let mut item = LineItem::from_product(shirt());
        item.quantity = qty;
        Cart::from_items(vec![item]).unwrap()
    }

    #[test]
    fn test_add_to_empty_cart() {
        let (cart, change) = Cart::new().with_added(&shirt());

        assert_eq!(change, CartChange::Appended);
        assert_eq!(cart.len(), 1);
        let item = cart.get(&ProductId::new("p1")).unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.title, "Shirt");
        assert_eq!(item.image_url, "u");
        assert_eq!(item.price, 20.0);
    }

    #[test]
    fn test_add_existing_routes_to_increment() {
        let cart = cart_with(1);
        let (added, change) = cart.with_added(&shirt());
        let (incremented, _) = cart.with_incremented(&ProductId::new("p1"));

        assert_eq!(change, CartChange::Incremented(2));
        assert_eq!(added, incremented);
        assert_eq!(added.len(), 1);
    }

    #[test]
    fn test_add_existing_keeps_stored_fields() {
        let cart = cart_with(1);
        let (next, _) = cart.with_added(&Product::new("p1", "Renamed", "other", 99.0));

        let item = next.get(&ProductId::new("p1")).unwrap();
        assert_eq!(item.title, "Shirt");
        assert_eq!(item.price, 20.0);
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let (cart, _) = Cart::new().with_added(&Product::new("a", "A", "", 1.0));
        let (cart, _) = cart.with_added(&Product::new("b", "B", "", 2.0));
        let (cart, _) = cart.with_added(&Product::new("a", "A", "", 1.0));
        let (cart, _) = cart.with_added(&Product::new("c", "C", "", 3.0));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(cart.get(&ProductId::new("a")).unwrap().quantity, 2);
    }

    #[test]
    fn test_increment() {
        let (cart, change) = cart_with(1).with_incremented(&ProductId::new("p1"));
        assert_eq!(change, CartChange::Incremented(2));
        assert_eq!(cart.get(&ProductId::new("p1")).unwrap().quantity, 2);
    }

    #[test]
    fn test_increment_unknown_is_noop() {
        let before = cart_with(3);
        let (after, change) = before.with_incremented(&ProductId::new("unknown"));
        assert_eq!(change, CartChange::Unchanged);
        assert_eq!(after, before);
    }

    #[test]
    fn test_increment_at_ceiling_is_noop() {
        let before = cart_with(u32::MAX);
        let (after, change) = before.with_incremented(&ProductId::new("p1"));
        assert_eq!(change, CartChange::Unchanged);
        assert_eq!(after, before);
    }

    #[test]
    fn test_decrement_floors_at_one() {
        let before = cart_with(1);
        let (after, change) = before.with_decremented(&ProductId::new("p1"));
        assert_eq!(change, CartChange::Unchanged);
        assert_eq!(after, before);
    }

    #[test]
    fn test_decrement() {
        let (cart, change) = cart_with(2).with_decremented(&ProductId::new("p1"));
        assert_eq!(change, CartChange::Decremented(1));
        assert_eq!(cart.get(&ProductId::new("p1")).unwrap().quantity, 1);
    }

    #[test]
    fn test_decrement_unknown_is_noop() {
        let (cart, change) = Cart::new().with_decremented(&ProductId::new("nope"));
        assert_eq!(change, CartChange::Unchanged);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_leaves_original_untouched() {
        let original = cart_with(1);
        let _ = original.with_incremented(&ProductId::new("p1"));
        assert_eq!(original.get(&ProductId::new("p1")).unwrap().quantity, 1);
    }

    #[test]
    fn test_apply_dispatches() {
        let op = CartOp::Add(shirt());
        assert_eq!(op.name(), "add_to_cart");
        assert_eq!(op.target().as_str(), "p1");

        let (cart, change) = Cart::new().apply(&op);
        assert_eq!(change, CartChange::Appended);

        let (cart, change) = cart.apply(&CartOp::Increment("p1".into()));
        assert_eq!(change, CartChange::Incremented(2));

        let (_, change) = cart.apply(&CartOp::Decrement("p1".into()));
        assert_eq!(change, CartChange::Decremented(1));
    }

    #[test]
    fn test_from_items_rejects_duplicates() {
        let item = LineItem::from_product(shirt());
        let result = Cart::from_items(vec![item.clone(), item]);
        assert!(matches!(result, Err(CommerceError::DuplicateItem(id)) if id.as_str() == "p1"));
    }

    #[test]
    fn test_from_items_rejects_zero_quantity() {
        let mut item = LineItem::from_product(shirt());
        item.quantity = 0;
        assert!(matches!(
            Cart::from_items(vec![item]),
            Err(CommerceError::ZeroQuantity(_))
        ));
    }

    #[test]
    fn test_totals() {
        let (cart, _) = cart_with(3).with_added(&Product::new("p2", "Hat", "h", 5.5));
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.subtotal(), 65.5);
    }

    #[test]
    fn test_deserialize_checks_items() {
        let dup = r#"[{"id":"p1","title":"X","image_url":"u","price":5,"quantity":0},{"id":"p1","title":"X","image_url":"u","price":5,"quantity":2}]"#;
        assert!(serde_json::from_str::<Cart>(dup).is_err());

        let ok = r#"[{"id":"p1","title":"X","image_url":"u","price":5,"quantity":2}]"#;
        let cart: Cart = serde_json::from_str(ok).unwrap();
        assert_eq!(cart.item_count(), 2);
        assert_eq!(serde_json::to_string(&cart).unwrap(), ok.replace("5,", "5.0,"));
    }

    #[test]
    fn test_product_accepts_camel_case_image() {
        let product: Product =
            serde_json::from_str(r#"{"id":"p1","title":"X","imageUrl":"u","price":5}"#).unwrap();
        assert_eq!(product.image_url, "u");
    }
}
