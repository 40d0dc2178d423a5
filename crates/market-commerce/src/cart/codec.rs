//! Persisted blob format.
//!
//! A cart is stored as a JSON array of line items, each with exactly the
//! fields `id`, `title`, `image_url`, `price` and `quantity`. There is no
//! envelope, version or checksum.

use crate::cart::{Cart, LineItem};
use crate::error::CommerceError;

/// Serialize a cart to its blob.
///
/// Fails on NaN or infinite prices, which JSON would turn into `null` and
/// make the blob unreadable on the next load.
pub fn encode(cart: &Cart) -> Result<String, CommerceError> {
    if let Some(item) = cart.items().iter().find(|i| !i.price.is_finite()) {
        return Err(CommerceError::NonFinitePrice(item.id.clone()));
    }
    Ok(serde_json::to_string(cart.items())?)
}

/// Parse a blob back into a cart.
///
/// Rejects anything that is not an array of well-formed items, as well as
/// arrays that break cart invariants (duplicate ids, zero quantities).
pub fn decode(blob: &str) -> Result<Cart, CommerceError> {
    let items: Vec<LineItem> =
        serde_json::from_str(blob).map_err(|e| CommerceError::MalformedCart(e.to_string()))?;
    Cart::from_items(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Product;
    use crate::ids::ProductId;

    #[test]
    fn test_encode_empty_cart() {
        assert_eq!(encode(&Cart::new()).unwrap(), "[]");
    }

    #[test]
    fn test_encode_has_exactly_five_fields() {
        let (cart, _) = Cart::new().with_added(&Product::new("p1", "Shirt", "u", 20.0));
        let blob = encode(&cart).unwrap();

        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        let item = value.as_array().unwrap()[0].as_object().unwrap();
        let mut keys: Vec<&str> = item.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["id", "image_url", "price", "quantity", "title"]);
        assert_eq!(item["id"], "p1");
        assert_eq!(item["quantity"], 1);
    }

    #[test]
    fn test_decode_persisted_blob() {
        let cart =
            decode(r#"[{"id":"p1","title":"X","image_url":"u","price":5,"quantity":3}]"#).unwrap();

        assert_eq!(
            cart.items(),
            &[LineItem {
                id: ProductId::new("p1"),
                title: "X".to_string(),
                image_url: "u".to_string(),
                price: 5.0,
                quantity: 3,
            }]
        );
    }

    #[test]
    fn test_decode_camel_case_image_url() {
        let blob = r#"[{"id":"p1","title":"X","imageUrl":"u","price":5,"quantity":3}]"#;
        let cart = decode(blob).unwrap();
        assert_eq!(cart.items()[0].image_url, "u");
        assert_eq!(cart.items()[0].quantity, 3);

        // Written back with the snake_case name.
        assert!(encode(&cart).unwrap().contains(r#""image_url":"u""#));
    }

    #[test]
    fn test_decode_then_encode_is_stable() {
        let blob = r#"[{"id":"a","title":"A","image_url":"ia","price":1.25,"quantity":2},{"id":"b","title":"B","image_url":"ib","price":3.0,"quantity":1}]"#;
        let cart = decode(blob).unwrap();
        assert_eq!(decode(&encode(&cart).unwrap()).unwrap(), cart);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode("not json"), Err(CommerceError::MalformedCart(_))));
        assert!(matches!(decode(r#"{"id":"p1"}"#), Err(CommerceError::MalformedCart(_))));
        assert!(matches!(
            decode(r#"[{"id":"p1","title":"X","image_url":"u","price":5}]"#),
            Err(CommerceError::MalformedCart(_))
        ));
    }

    #[test]
    fn test_decode_rejects_negative_quantity() {
        let blob = r#"[{"id":"p1","title":"X","image_url":"u","price":5,"quantity":-1}]"#;
        assert!(matches!(decode(blob), Err(CommerceError::MalformedCart(_))));
    }

    #[test]
    fn test_decode_rejects_invariant_breaks() {
        let dup = r#"[{"id":"p1","title":"X","image_url":"u","price":5,"quantity":1},{"id":"p1","title":"X","image_url":"u","price":5,"quantity":2}]"#;
        assert!(matches!(decode(dup), Err(CommerceError::DuplicateItem(_))));

        let zero = r#"[{"id":"p1","title":"X","image_url":"u","price":5,"quantity":0}]"#;
        assert!(matches!(decode(zero), Err(CommerceError::ZeroQuantity(_))));
    }

    #[test]
    fn test_encode_rejects_nan_price() {
        let (cart, _) = Cart::new().with_added(&Product::new("p1", "Shirt", "u", f64::NAN));
        assert!(matches!(encode(&cart), Err(CommerceError::NonFinitePrice(_))));
    }
}
