use super::transaction::{Transaction, TransactionId};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of candidate transaction ids. Uniqueness is checked by the store.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> TransactionId;
}

/// A single stored transaction behind its own lock.
pub type TransactionRecord = Arc<Mutex<Transaction>>;

#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Inserts `tx` unless its id is already taken. Returns whether it was inserted.
    async fn insert_if_absent(&self, tx: Transaction) -> Result<bool>;
    async fn record(&self, id: &TransactionId) -> Result<Option<TransactionRecord>>;

    async fn get(&self, id: &TransactionId) -> Result<Option<Transaction>> {
        let Some(record) = self.record(id).await? else {
            return Ok(None);
        };
        let tx = record.lock().await.clone();
        Ok(Some(tx))
    }
}

pub type TransactionStoreBox = Box<dyn TransactionStore>;
pub type ClockRef = Arc<dyn Clock>;
pub type IdSourceRef = Arc<dyn IdSource>;
