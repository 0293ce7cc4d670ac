use crate::domain::ports::{TransactionRecord, TransactionStore};
use crate::domain::transaction::{Transaction, TransactionId};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// A thread-safe in-memory transaction store.
///
/// The map itself sits behind an `RwLock` so lookups run concurrently;
/// each record has its own `Mutex` so status transitions on one
/// transaction never block another.
#[derive(Default, Clone)]
pub struct InMemoryTransactionStore {
    transactions: Arc<RwLock<HashMap<TransactionId, TransactionRecord>>>,
}

impl InMemoryTransactionStore {
    /// Creates a new, empty in-memory transaction store.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.transactions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn insert_if_absent(&self, tx: Transaction) -> Result<bool> {
        let mut transactions = self.transactions.write().await;
        match transactions.entry(tx.id().clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(tx)));
                Ok(true)
            }
        }
    }

    async fn record(&self, id: &TransactionId) -> Result<Option<TransactionRecord>> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(id).cloned())
    }
}
