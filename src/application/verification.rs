use super::policy::VerificationPolicy;
use super::registry::TransactionRegistry;
use crate::domain::transaction::{Transaction, TransactionStatus};
use crate::error::Result;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const MSG_NOT_FOUND: &str = "Transaction not found";
pub const MSG_EXPIRED: &str = "Payment verification timeout. Please try again.";
pub const MSG_COMPLETED: &str =
    "Payment verified successfully! Your Flash Creepto has been sent to your wallet.";
pub const MSG_VERIFYING: &str = "Verifying your payment...";

/// Status reported to a polling client. `NotFound` is never stored.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum PollStatus {
    Verifying,
    Completed,
    Expired,
    NotFound,
}

impl From<TransactionStatus> for PollStatus {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Verifying => Self::Verifying,
            TransactionStatus::Completed => Self::Completed,
            TransactionStatus::Expired => Self::Expired,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub status: PollStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub seconds_remaining: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub redirect_target: Option<String>,
}

impl StatusReport {
    fn not_found() -> Self {
        Self {
            status: PollStatus::NotFound,
            message: MSG_NOT_FOUND.to_string(),
            seconds_remaining: None,
            redirect_target: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, PollStatus::Completed | PollStatus::Expired)
    }
}

/// The payment verification state machine.
///
/// `Verifying` moves to `Expired` once `now` passes `expiresAt`, otherwise
/// to `Completed` once more than the verification delay has elapsed. Each
/// record is locked for the whole check-then-transition, so concurrent
/// polls apply a terminal transition exactly once.
pub struct VerificationStatusEngine {
    registry: Arc<TransactionRegistry>,
    policy: VerificationPolicy,
}

impl VerificationStatusEngine {
    pub fn new(registry: Arc<TransactionRegistry>, policy: VerificationPolicy) -> Self {
        Self { registry, policy }
    }

    pub async fn poll(&self, id: &str, now: DateTime<Utc>) -> Result<StatusReport> {
        let Some(record) = self.registry.record(id).await? else {
            return Ok(StatusReport::not_found());
        };
        let mut tx = record.lock().await;

        if tx.status().is_terminal() {
            return Ok(self.terminal_report(tx.status()));
        }

        let elapsed = now - tx.created_at();
        if now > tx.expires_at() {
            self.transition(&mut tx, TransactionStatus::Expired, now);
            return Ok(self.terminal_report(TransactionStatus::Expired));
        }
        if elapsed > self.policy.verification_delay {
            self.transition(&mut tx, TransactionStatus::Completed, now);
            return Ok(self.terminal_report(TransactionStatus::Completed));
        }

        Ok(StatusReport {
            status: PollStatus::Verifying,
            message: MSG_VERIFYING.to_string(),
            seconds_remaining: Some(self.seconds_remaining(elapsed)),
            redirect_target: None,
        })
    }

    fn seconds_remaining(&self, elapsed: TimeDelta) -> i64 {
        (self.policy.expiry_window.num_seconds() - elapsed.num_seconds()).max(0)
    }

    fn transition(&self, tx: &mut Transaction, to: TransactionStatus, now: DateTime<Utc>) {
        if tx.resolve(to, now) {
            tracing::info!(tx_id = %tx.id(), status = ?to, "transaction resolved");
        }
    }

    fn terminal_report(&self, status: TransactionStatus) -> StatusReport {
        match status {
            TransactionStatus::Completed => StatusReport {
                status: PollStatus::Completed,
                message: MSG_COMPLETED.to_string(),
                seconds_remaining: None,
                redirect_target: Some(self.policy.success_target.clone()),
            },
            _ => StatusReport {
                status: status.into(),
                message: MSG_EXPIRED.to_string(),
                seconds_remaining: None,
                redirect_target: None,
            },
        }
    }
}
