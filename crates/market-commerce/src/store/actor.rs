//! The task that owns the cart.
//!
//! One message is handled at a time, and a mutation's persistence write
//! completes (or fails) before the next message is read. Every operation
//! therefore sees the result of all earlier ones, and blob writes land in
//! the order operations were issued.

use std::sync::Arc;

use market_cache::KvStore;
use market_observability::StoreMetrics;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

use crate::cart::{codec, Cart, CartOp, LineItem};
use crate::error::CommerceError;
use crate::store::CartSnapshot;

/// Messages accepted by the cart task.
pub(crate) enum Command {
    Apply {
        op: CartOp,
        reply: oneshot::Sender<CartSnapshot>,
    },
    Items {
        reply: oneshot::Sender<Vec<LineItem>>,
    },
    Flush {
        reply: oneshot::Sender<CartSnapshot>,
    },
}

pub(crate) struct CartActor<S> {
    kv: S,
    key: String,
    cart: Cart,
    durable: bool,
    state: watch::Sender<CartSnapshot>,
    metrics: Arc<StoreMetrics>,
}

impl<S: KvStore> CartActor<S> {
    pub(crate) fn new(
        kv: S,
        key: String,
        state: watch::Sender<CartSnapshot>,
        metrics: Arc<StoreMetrics>,
    ) -> Self {
        Self {
            kv,
            key,
            cart: Cart::new(),
            durable: false,
            state,
            metrics,
        }
    }

    /// Load, then serve commands until every sender is gone or `stop` fires.
    /// On `stop` the mailbox is closed to new operations and drained.
    pub(crate) async fn run(
        mut self,
        mut mailbox: mpsc::Receiver<Command>,
        mut stop: oneshot::Receiver<()>,
    ) {
        self.initialize().await;

        loop {
            tokio::select! {
                biased;
                _ = &mut stop => {
                    mailbox.close();
                    while let Some(command) = mailbox.recv().await {
                        self.handle(command).await;
                    }
                    break;
                }
                command = mailbox.recv() => match command {
                    Some(command) => self.handle(command).await,
                    None => break,
                },
            }
        }

        debug!(key = %self.key, items = self.cart.len(), "Cart store stopped");
    }

    async fn initialize(&mut self) {
        let (cart, durable) = match self.kv.get(&self.key).await {
            Ok(Some(blob)) if !blob.trim().is_empty() => match codec::decode(&blob) {
                Ok(cart) => {
                    info!(key = %self.key, items = cart.len(), "Loaded persisted cart");
                    (cart, true)
                }
                Err(e) => {
                    warn!(key = %self.key, error = %e, "Persisted cart is malformed, starting empty");
                    self.metrics.record_malformed_blob();
                    (Cart::new(), false)
                }
            },
            Ok(_) => {
                debug!(key = %self.key, "No persisted cart, starting empty");
                (Cart::new(), true)
            }
            Err(e) => {
                error!(key = %self.key, error = %e, "Failed to read persisted cart, starting empty");
                self.metrics.record_load_failure();
                (Cart::new(), false)
            }
        };

        self.metrics.record_load();
        self.cart = cart;
        self.durable = durable;
        self.publish();
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Apply { op, reply } => {
                let snapshot = self.apply(op).await;
                let _ = reply.send(snapshot);
            }
            Command::Items { reply } => {
                let _ = reply.send(self.cart.items().to_vec());
            }
            Command::Flush { reply } => {
                self.durable = self.persist(&self.cart).await;
                self.publish();
                let _ = reply.send(self.snapshot());
            }
        }
    }

    async fn apply(&mut self, op: CartOp) -> CartSnapshot {
        let (next, change) = self.cart.apply(&op);
        self.metrics.record_mutation();
        debug!(op = op.name(), id = %op.target(), ?change, "Cart operation applied");

        self.durable = self.persist(&next).await;
        self.cart = next;
        self.publish();
        self.snapshot()
    }

    /// Write the full cart. Failures are logged and reported, never raised.
    async fn persist(&self, cart: &Cart) -> bool {
        let result: Result<(), CommerceError> = match codec::encode(cart) {
            Ok(blob) => self.kv.set(&self.key, &blob).await.map_err(Into::into),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                self.metrics.record_write(true);
                true
            }
            Err(e) => {
                warn!(key = %self.key, items = cart.len(), error = %e, "Failed to persist cart");
                self.metrics.record_write(false);
                false
            }
        }
    }

    fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            cart: self.cart.clone(),
            initialized: true,
            durable: self.durable,
        }
    }

    fn publish(&self) {
        self.state.send_replace(self.snapshot());
    }
}
