use super::policy::VerificationPolicy;
use crate::domain::ports::{ClockRef, IdSourceRef, TransactionRecord, TransactionStoreBox};
use crate::domain::quote::Quote;
use crate::domain::transaction::{Transaction, TransactionId};
use crate::error::{CheckoutError, Result};

/// Upper bound on id draws per `create` before giving up.
pub const MAX_ID_ATTEMPTS: u32 = 64;

/// Creates and looks up transactions.
///
/// The registry never changes a stored status itself; terminal
/// transitions belong to `VerificationStatusEngine`.
pub struct TransactionRegistry {
    store: TransactionStoreBox,
    ids: IdSourceRef,
    clock: ClockRef,
    expiry_window: chrono::TimeDelta,
}

impl TransactionRegistry {
    pub fn new(
        store: TransactionStoreBox,
        ids: IdSourceRef,
        clock: ClockRef,
        policy: &VerificationPolicy,
    ) -> Self {
        Self {
            store,
            ids,
            clock,
            expiry_window: policy.expiry_window,
        }
    }

    /// Records a new `Verifying` transaction for `quote`.
    ///
    /// Draws ids until the store accepts one; the store's insert is the
    /// uniqueness check, so two concurrent creates can never share an id.
    pub async fn create(
        &self,
        quote: &Quote,
        destination_wallet: &str,
        external_reference: &str,
    ) -> Result<Transaction> {
        let created_at = self.clock.now();

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let tx = Transaction::new(
                self.ids.next_id(),
                quote,
                destination_wallet,
                external_reference,
                created_at,
                self.expiry_window,
            );

            if self.store.insert_if_absent(tx.clone()).await? {
                tracing::info!(
                    tx_id = %tx.id(),
                    currency = %tx.currency(),
                    price = %tx.price(),
                    "transaction created"
                );
                return Ok(tx);
            }

            tracing::warn!(tx_id = %tx.id(), attempt, "transaction id collision, retrying");
        }

        Err(CheckoutError::IdSpaceExhausted(MAX_ID_ATTEMPTS))
    }

    /// Looks up a transaction. Malformed ids are simply unknown.
    pub async fn get(&self, id: &str) -> Result<Option<Transaction>> {
        match TransactionId::parse(id) {
            Some(id) => self.store.get(&id).await,
            None => Ok(None),
        }
    }

    pub(crate) async fn record(&self, id: &str) -> Result<Option<TransactionRecord>> {
        match TransactionId::parse(id) {
            Some(id) => self.store.record(&id).await,
            None => Ok(None),
        }
    }
}
