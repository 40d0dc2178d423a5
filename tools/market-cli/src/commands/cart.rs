//! Cart commands.

use anyhow::{bail, Result};
use market_commerce::cart::{Cart, LineItem, Product};
use market_commerce::store::{CartHandle, CartSnapshot};
use serde::Serialize;
use tracing::{info, warn};

use super::{AddArgs, ItemArgs};
use crate::context::Context;
use crate::output::{durability_badge, format_price};

/// Run the show command.
pub async fn show(ctx: &Context) -> Result<()> {
    let store = ctx.open_store().await?;
    let snapshot = store.handle().snapshot()?;
    store.shutdown().await?;

    print_cart(&snapshot, ctx);
    Ok(())
}

/// Run the add command.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    if !args.price.is_finite() {
        bail!("Price must be a finite number, got {}", args.price);
    }
    let product = Product::new(args.id, args.title, args.image_url, args.price);
    let id = product.id.clone();

    let snapshot = mutate(ctx, |cart| async move { cart.add_to_cart(product).await }).await?;
    report(&snapshot, &format!("Added {}", id), ctx);
    Ok(())
}

/// Run the increment command.
pub async fn increment(args: ItemArgs, ctx: &Context) -> Result<()> {
    let id = args.id;
    let target = id.clone();
    let snapshot = mutate(ctx, |cart| async move { cart.increment(target).await }).await?;
    report(&snapshot, &format!("Incremented {}", id), ctx);
    Ok(())
}

/// Run the decrement command.
pub async fn decrement(args: ItemArgs, ctx: &Context) -> Result<()> {
    let id = args.id;
    let target = id.clone();
    let snapshot = mutate(ctx, |cart| async move { cart.decrement(target).await }).await?;
    report(&snapshot, &format!("Decremented {}", id), ctx);
    Ok(())
}

async fn mutate<F, Fut>(ctx: &Context, op: F) -> Result<CartSnapshot>
where
    F: FnOnce(CartHandle) -> Fut,
    Fut: std::future::Future<Output = Result<CartSnapshot, market_commerce::CommerceError>>,
{
    let store = ctx.open_store().await?;
    let snapshot = op(store.handle()).await?;
    store.shutdown().await?;

    if snapshot.durable {
        info!(items = snapshot.cart.len(), "Cart saved");
    } else {
        warn!(data_dir = %ctx.data_dir.display(), "Cart change not saved");
    }
    Ok(snapshot)
}

fn report(snapshot: &CartSnapshot, msg: &str, ctx: &Context) {
    if !snapshot.durable {
        ctx.output
            .warn("The change was applied but could not be saved; run with --verbose for details");
    } else {
        ctx.output.success(msg);
    }
    print_cart(snapshot, ctx);
}

/// JSON view of a cart.
#[derive(Serialize)]
pub(crate) struct CartView<'a> {
    items: &'a [LineItem],
    item_count: u64,
    subtotal: f64,
    durable: bool,
}

impl<'a> CartView<'a> {
    pub(crate) fn new(cart: &'a Cart, durable: bool) -> Self {
        Self {
            items: cart.items(),
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
            durable,
        }
    }
}

fn print_cart(snapshot: &CartSnapshot, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&CartView::new(&snapshot.cart, snapshot.durable));
        return;
    }

    ctx.output.header("Cart");
    if snapshot.cart.is_empty() {
        ctx.output.info("The cart is empty.");
        return;
    }

    let widths = [16, 28, 10, 5];
    ctx.output.table_row(&["ID", "TITLE", "PRICE", "QTY"], &widths);
    for item in snapshot.items() {
        let price = format_price(item.price);
        let quantity = item.quantity.to_string();
        ctx.output
            .table_row(&[item.id.as_str(), &item.title, &price, &quantity], &widths);
    }

    println!();
    ctx.output
        .kv("Items", &snapshot.cart.item_count().to_string());
    ctx.output
        .kv("Subtotal", &format_price(snapshot.cart.subtotal()));
    ctx.output.kv("Status", &durability_badge(snapshot.durable));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_view_json() {
        let (cart, _) = Cart::new().with_added(&Product::new("p1", "Shirt", "u", 20.0));
        let (cart, _) = cart.with_incremented(&"p1".into());

        let value = serde_json::to_value(CartView::new(&cart, true)).unwrap();
        assert_eq!(value["item_count"], 2);
        assert_eq!(value["subtotal"], 40.0);
        assert_eq!(value["durable"], true);
        assert_eq!(value["items"][0]["id"], "p1");
        assert_eq!(value["items"][0]["quantity"], 2);
    }
}
