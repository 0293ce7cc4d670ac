use super::currency::{CurrencyKind, NetworkKind};
use super::quote::Quote;
use super::transaction::TransactionId;
use chrono::{DateTime, TimeDelta, Utc};

/// Per-buyer state carried between steps of the checkout flow.
///
/// Lives for `ttl` after its last use; a stale session is cleared on the
/// next access, so it behaves exactly like a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub currency: Option<CurrencyKind>,
    pub network: Option<NetworkKind>,
    pub plan: Option<String>,
    pub destination_wallet: Option<String>,
    pub quote: Option<Quote>,
    pub transaction_id: Option<TransactionId>,
    last_used: Option<DateTime<Utc>>,
    ttl: TimeDelta,
}

impl Session {
    pub fn new(ttl: TimeDelta) -> Self {
        Self {
            currency: None,
            network: None,
            plan: None,
            destination_wallet: None,
            quote: None,
            transaction_id: None,
            last_used: None,
            ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.last_used.is_some_and(|last| now - last > self.ttl)
    }

    /// Clears the session if it went stale, then marks it used at `now`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if self.is_expired(now) {
            self.clear();
        }
        self.last_used = Some(now);
    }

    pub fn clear(&mut self) {
        *self = Self::new(self.ttl);
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::new(self.ttl)
    }
}
