//! CLI command implementations.

pub mod cart;
pub mod stats;

use clap::Args;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product id.
    #[arg(long)]
    pub id: String,

    /// Product title.
    #[arg(long)]
    pub title: String,

    /// Product image URL.
    #[arg(long)]
    pub image_url: String,

    /// Unit price.
    #[arg(long)]
    pub price: f64,
}

/// Arguments for commands addressing one cart item.
#[derive(Args)]
pub struct ItemArgs {
    /// Product id.
    pub id: String,
}
