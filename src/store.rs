//! In-memory item collection.

use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::RwLock;

/// A client-supplied JSON object, stored verbatim.
pub type Item = Map<String, Value>;

/// Ordered, append-only collection of items.
///
/// Cloning the store yields another handle to the same collection; each
/// `ItemStore::new()` starts an independent one.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Arc<RwLock<Vec<Item>>>,
}

impl ItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item, returning the collection length afterwards.
    pub async fn append(&self, item: Item) -> usize {
        let mut items = self.items.write().await;
        items.push(item);
        items.len()
    }

    /// Snapshot of every item in insertion order.
    pub async fn list(&self) -> Vec<Item> {
        self.items.read().await.clone()
    }

    /// Number of stored items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Whether nothing has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}
