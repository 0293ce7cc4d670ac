use super::currency::CurrencyKind;
use super::quote::{Amount, Quote};
use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TRANSACTION_ID_LEN: usize = 16;

/// A 16-character identifier over `[A-Z0-9]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Returns `None` unless `raw` is exactly 16 uppercase ASCII letters or digits.
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == TRANSACTION_ID_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
        well_formed.then(|| Self(raw.to_string()))
    }

    /// For generators that draw only from `[A-Z0-9]`.
    pub(crate) fn from_generated(raw: String) -> Self {
        debug_assert!(raw.len() == TRANSACTION_ID_LEN);
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Verifying,
    Completed,
    Expired,
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Verifying)
    }
}

/// A confirmed purchase awaiting (simulated) payment verification.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    id: TransactionId,
    currency: CurrencyKind,
    amount: Amount,
    price: Decimal,
    destination_wallet: String,
    external_reference: String,
    status: TransactionStatus,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Builds a fresh `Verifying` record. Price and amount come from the
    /// quote, never from the caller.
    pub fn new(
        id: TransactionId,
        quote: &Quote,
        destination_wallet: impl Into<String>,
        external_reference: impl Into<String>,
        created_at: DateTime<Utc>,
        window: TimeDelta,
    ) -> Self {
        Self {
            id,
            currency: quote.currency(),
            amount: quote.amount(),
            price: quote.price(),
            destination_wallet: destination_wallet.into(),
            external_reference: external_reference.into(),
            status: TransactionStatus::Verifying,
            created_at,
            expires_at: created_at + window,
            resolved_at: None,
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn currency(&self) -> CurrencyKind {
        self.currency
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn destination_wallet(&self) -> &str {
        &self.destination_wallet
    }

    pub fn external_reference(&self) -> &str {
        &self.external_reference
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.resolved_at
    }

    /// Moves a `Verifying` record into a terminal state.
    ///
    /// Returns `false` and leaves the record untouched if it is already
    /// terminal or `to` is not terminal.
    pub fn resolve(&mut self, to: TransactionStatus, at: DateTime<Utc>) -> bool {
        if self.status.is_terminal() || !to.is_terminal() {
            return false;
        }
        self.status = to;
        self.resolved_at = Some(at);
        true
    }
}
