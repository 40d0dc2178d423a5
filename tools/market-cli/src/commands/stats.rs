//! Cart and store statistics.

use anyhow::Result;
use market_observability::MetricsSnapshot;
use serde::Serialize;

use super::cart::CartView;
use crate::context::Context;
use crate::output::{durability_badge, format_price};

#[derive(Serialize)]
struct StatsReport<'a> {
    data_dir: String,
    key: &'a str,
    cart: CartView<'a>,
    metrics: MetricsSnapshot,
}

/// Run the stats command.
pub async fn run(ctx: &Context) -> Result<()> {
    let store = ctx.open_store().await?;
    let cart = store.handle();
    let snapshot = cart.snapshot()?;
    let metrics = cart.metrics();
    drop(cart);
    store.shutdown().await?;

    if ctx.output.is_json() {
        ctx.output.json(&StatsReport {
            data_dir: ctx.data_dir.display().to_string(),
            key: &ctx.config.storage.key,
            cart: CartView::new(&snapshot.cart, snapshot.durable),
            metrics,
        });
        return Ok(());
    }

    ctx.output.header("Cart store");
    ctx.output.kv("Data directory", &ctx.data_dir.display().to_string());
    ctx.output.kv("Key", &ctx.config.storage.key);
    ctx.output.kv("Status", &durability_badge(snapshot.durable));

    ctx.output.header("Cart");
    ctx.output.kv("Lines", &snapshot.cart.len().to_string());
    ctx.output.kv("Items", &snapshot.cart.item_count().to_string());
    ctx.output.kv("Subtotal", &format_price(snapshot.cart.subtotal()));

    ctx.output.header("Counters");
    ctx.output.kv("This run", &metrics.to_summary());
    if metrics.malformed_blobs > 0 {
        ctx.output
            .warn("The stored cart could not be read and was ignored; the next change overwrites it");
    }

    Ok(())
}
