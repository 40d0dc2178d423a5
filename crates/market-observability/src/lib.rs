//! Observability for the marketplace cart.
//!
//! This crate provides:
//! - `init_tracing` / `LogConfig` - tracing subscriber setup
//! - `StoreMetrics` - counters recorded by the cart store

mod logging;
mod metrics;

pub use logging::*;
pub use metrics::*;
