//! Owner and handles for a running cart store.

use std::sync::Arc;

use market_cache::KvStore;
use market_observability::{MetricsSnapshot, StoreMetrics};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::cart::{Cart, CartOp, LineItem, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::store::actor::{CartActor, Command};
use crate::store::CartStoreConfig;

/// A published view of the cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSnapshot {
    /// Cart contents.
    pub cart: Cart,
    /// False until the persisted cart has been loaded.
    pub initialized: bool,
    /// Whether the last write of this cart reached the backend.
    pub durable: bool,
}

impl CartSnapshot {
    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }
}

/// Owner of a running cart store.
///
/// The store lives until [`CartStore::shutdown`] is called or the owner is
/// dropped. After that every [`CartHandle`] returns
/// [`CommerceError::OutOfScope`].
///
/// # Example
///
/// ```rust,ignore
/// let store = CartStore::spawn(FileStore::open(dir)?, CartStoreConfig::default());
/// let cart = store.handle();
///
/// cart.add_to_cart(Product::new("p1", "Shirt", "u", 20.0)).await?;
/// cart.increment("p1").await?;
///
/// store.shutdown().await?;
/// ```
pub struct CartStore {
    handle: CartHandle,
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl CartStore {
    /// Start a store persisting through `kv`. Must be called within a Tokio runtime.
    ///
    /// The persisted cart is loaded before any operation is served.
    pub fn spawn<S>(kv: S, config: CartStoreConfig) -> Self
    where
        S: KvStore + 'static,
    {
        Self::spawn_with_metrics(kv, config, Arc::new(StoreMetrics::new()))
    }

    /// Start a store that records into shared `metrics`.
    pub fn spawn_with_metrics<S>(kv: S, config: CartStoreConfig, metrics: Arc<StoreMetrics>) -> Self
    where
        S: KvStore + 'static,
    {
        let (tx, mailbox) = mpsc::channel(config.effective_capacity());
        let (state_tx, state_rx) = watch::channel(CartSnapshot::default());
        let (stop, stop_rx) = oneshot::channel();

        let actor = CartActor::new(kv, config.storage_key, state_tx, Arc::clone(&metrics));
        let task = tokio::spawn(actor.run(mailbox, stop_rx));

        Self {
            handle: CartHandle {
                tx,
                state: state_rx,
                metrics,
            },
            stop,
            task,
        }
    }

    /// Get a handle for consumers.
    pub fn handle(&self) -> CartHandle {
        self.handle.clone()
    }

    /// Stop accepting operations, finish the queued ones, and wait for the
    /// store task to exit.
    pub async fn shutdown(self) -> Result<(), CommerceError> {
        let Self { handle, stop, task } = self;
        drop(handle);
        let _ = stop.send(());
        task.await
            .map_err(|e| CommerceError::StoreTaskFailed(e.to_string()))
    }
}

/// Cheap, cloneable access to a cart store.
#[derive(Clone)]
pub struct CartHandle {
    tx: mpsc::Sender<Command>,
    state: watch::Receiver<CartSnapshot>,
    metrics: Arc<StoreMetrics>,
}

impl CartHandle {
    /// Whether the store behind this handle is still running.
    pub fn is_active(&self) -> bool {
        !self.tx.is_closed()
    }

    /// Add a product: appends it with quantity 1, or increments it if present.
    pub async fn add_to_cart(&self, product: Product) -> Result<CartSnapshot, CommerceError> {
        self.apply(CartOp::Add(product)).await
    }

    /// Raise an item's quantity by one. Unknown ids are a no-op.
    pub async fn increment(&self, id: impl Into<ProductId>) -> Result<CartSnapshot, CommerceError> {
        self.apply(CartOp::Increment(id.into())).await
    }

    /// Lower an item's quantity by one, never below 1. Unknown ids are a no-op.
    pub async fn decrement(&self, id: impl Into<ProductId>) -> Result<CartSnapshot, CommerceError> {
        self.apply(CartOp::Decrement(id.into())).await
    }

    /// Apply an operation and return the resulting snapshot.
    pub async fn apply(&self, op: CartOp) -> Result<CartSnapshot, CommerceError> {
        self.request(|reply| Command::Apply { op, reply }).await
    }

    /// Items after the load and every operation queued before this call.
    pub async fn items(&self) -> Result<Vec<LineItem>, CommerceError> {
        self.request(|reply| Command::Items { reply }).await
    }

    /// Write the current cart again, e.g. after a failed write.
    pub async fn flush(&self) -> Result<CartSnapshot, CommerceError> {
        self.request(|reply| Command::Flush { reply }).await
    }

    /// Latest published snapshot, without waiting.
    ///
    /// `initialized` is false while the startup load is still running.
    pub fn snapshot(&self) -> Result<CartSnapshot, CommerceError> {
        self.ensure_active()?;
        Ok(self.state.borrow().clone())
    }

    /// Receiver notified on every published snapshot.
    pub fn subscribe(&self) -> Result<watch::Receiver<CartSnapshot>, CommerceError> {
        self.ensure_active()?;
        Ok(self.state.clone())
    }

    /// Wait until the startup load has completed.
    pub async fn ready(&self) -> Result<(), CommerceError> {
        self.ensure_active()?;
        let mut state = self.state.clone();
        state
            .wait_for(|s| s.initialized)
            .await
            .map_err(|_| CommerceError::OutOfScope)?;
        Ok(())
    }

    /// Counters recorded by the store.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn ensure_active(&self) -> Result<(), CommerceError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(CommerceError::OutOfScope)
        }
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, CommerceError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(command(reply))
            .await
            .map_err(|_| CommerceError::OutOfScope)?;
        response.await.map_err(|_| CommerceError::OutOfScope)
    }
}

impl std::fmt::Debug for CartHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartHandle")
            .field("active", &self.is_active())
            .finish()
    }
}
