use super::policy::VerificationPolicy;
use super::registry::TransactionRegistry;
use super::verification::{StatusReport, VerificationStatusEngine};
use crate::domain::address::PaymentAddressResolver;
use crate::domain::currency::{CurrencyKind, NetworkKind};
use crate::domain::ports::{ClockRef, IdSourceRef, TransactionStoreBox};
use crate::domain::quote::{AmountBounds, PriceCalculator};
use crate::domain::session::Session;
use crate::domain::transaction::{Transaction, TransactionId};
use crate::error::{CheckoutError, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub currency: CurrencyKind,
    pub network: Option<NetworkKind>,
    pub plan: String,
}

#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub formatted_price: String,
}

#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInstructions {
    pub currency: CurrencyKind,
    pub amount: Decimal,
    pub price: Decimal,
    pub deposit_address: String,
    pub network: NetworkKind,
    pub destination_wallet: String,
    pub bounds: AmountBounds,
    pub within_bounds: bool,
}

#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingView {
    pub transaction_id: TransactionId,
    pub currency: CurrencyKind,
    pub amount: Decimal,
    pub price: Decimal,
}

/// Tells the caller to send the buyer back to the first step.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
pub struct RedirectToStart;

#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(tag = "view", content = "transaction", rename_all = "snake_case")]
pub enum SuccessView {
    Receipt(Transaction),
    RedirectToStart,
}

/// The buyer-facing purchase flow.
///
/// Each step reads and writes an explicit `Session`; the only shared state
/// is the transaction registry.
pub struct CheckoutFlow {
    registry: Arc<TransactionRegistry>,
    engine: VerificationStatusEngine,
    resolver: PaymentAddressResolver,
    clock: ClockRef,
    policy: VerificationPolicy,
}

impl CheckoutFlow {
    pub fn new(
        store: TransactionStoreBox,
        ids: IdSourceRef,
        clock: ClockRef,
        resolver: PaymentAddressResolver,
        policy: VerificationPolicy,
    ) -> Self {
        let registry = Arc::new(TransactionRegistry::new(store, ids, clock.clone(), &policy));
        let engine = VerificationStatusEngine::new(registry.clone(), policy.clone());
        Self {
            registry,
            engine,
            resolver,
            clock,
            policy,
        }
    }

    pub fn registry(&self) -> &TransactionRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &VerificationStatusEngine {
        &self.engine
    }

    pub fn new_session(&self) -> Session {
        Session::new(self.policy.session_ttl)
    }

    pub fn select_plan(
        &self,
        session: &mut Session,
        currency: CurrencyKind,
        network: Option<NetworkKind>,
        plan: &str,
    ) -> Selection {
        session.touch(self.clock.now());
        session.currency = Some(currency);
        session.network = network;
        session.plan = Some(plan.to_string());

        Selection {
            currency,
            network,
            plan: plan.to_string(),
        }
    }

    pub fn calculate_price(&self, currency: CurrencyKind, amount: Decimal) -> Result<PriceResponse> {
        let quote = PriceCalculator::quote(currency, amount)?;
        Ok(PriceResponse {
            price: quote.rounded_price(),
            formatted_price: quote.formatted_price(),
        })
    }

    /// Quotes the purchase and picks the deposit address.
    ///
    /// The network comes from the earlier plan selection. Amount bounds are
    /// reported but not enforced.
    pub fn submit_wallet(
        &self,
        session: &mut Session,
        currency: CurrencyKind,
        destination_wallet: &str,
        amount: Decimal,
    ) -> Result<PaymentInstructions> {
        session.touch(self.clock.now());

        let destination_wallet = destination_wallet.trim();
        if destination_wallet.is_empty() {
            return Err(CheckoutError::InvalidInput(
                "destination wallet must not be empty".to_string(),
            ));
        }
        let quote = PriceCalculator::quote(currency, amount)?;
        let bounds = AmountBounds::for_currency(currency);
        let deposit = self.resolver.resolve(currency, session.network);

        session.currency = Some(currency);
        session.destination_wallet = Some(destination_wallet.to_string());
        session.quote = Some(quote);

        Ok(PaymentInstructions {
            currency,
            amount: quote.amount().value(),
            price: quote.price(),
            deposit_address: deposit.address,
            network: deposit.network,
            destination_wallet: destination_wallet.to_string(),
            bounds,
            within_bounds: bounds.contains(quote.amount()),
        })
    }

    /// Records the buyer's claimed payment and starts verification.
    pub async fn verify_payment(
        &self,
        session: &mut Session,
        external_reference: &str,
    ) -> Result<ProcessingView> {
        session.touch(self.clock.now());

        let (Some(quote), Some(wallet)) = (session.quote, session.destination_wallet.as_deref())
        else {
            return Err(CheckoutError::InvalidInput(
                "no quoted submission in session".to_string(),
            ));
        };

        let tx = self.registry.create(&quote, wallet, external_reference).await?;
        session.transaction_id = Some(tx.id().clone());

        Ok(ProcessingView {
            transaction_id: tx.id().clone(),
            currency: tx.currency(),
            amount: tx.amount().value(),
            price: tx.price(),
        })
    }

    pub async fn check_status(&self, id: &str) -> Result<StatusReport> {
        self.engine.poll(id, self.clock.now()).await
    }

    pub async fn success(&self, session: &mut Session) -> Result<SuccessView> {
        session.touch(self.clock.now());

        let Some(id) = session.transaction_id.as_ref() else {
            return Ok(SuccessView::RedirectToStart);
        };
        Ok(match self.registry.get(id.as_str()).await? {
            Some(tx) => SuccessView::Receipt(tx),
            None => SuccessView::RedirectToStart,
        })
    }

    pub fn reset(&self, session: &mut Session) -> RedirectToStart {
        session.clear();
        tracing::debug!("session reset");
        RedirectToStart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::address::AddressDirectory;
    use crate::infrastructure::clock::ManualClock;
    use crate::infrastructure::id_source::RandomIdSource;
    use crate::infrastructure::in_memory::InMemoryTransactionStore;
    use chrono::{DateTime, Utc};
    use rust_decimal_macros::dec;

    fn flow() -> CheckoutFlow {
        CheckoutFlow::new(
            Box::new(InMemoryTransactionStore::new()),
            Arc::new(RandomIdSource),
            Arc::new(ManualClock::new(DateTime::<Utc>::UNIX_EPOCH)),
            PaymentAddressResolver::new(AddressDirectory::default()),
            VerificationPolicy::default(),
        )
    }

    #[test]
    fn test_calculate_price_response() {
        let response = flow().calculate_price(CurrencyKind::Bitcoin, dec!(0.1)).unwrap();
        assert_eq!(response.price, dec!(50));
        assert_eq!(response.formatted_price, "$50.00");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["price"], 50.0);
        assert_eq!(json["formattedPrice"], "$50.00");
    }

    #[test]
    fn test_calculate_price_rejects_zero() {
        assert!(matches!(
            flow().calculate_price(CurrencyKind::Usdt, Decimal::ZERO),
            Err(CheckoutError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_select_plan_echoes_and_stores() {
        let flow = flow();
        let mut session = flow.new_session();
        let selection = flow.select_plan(
            &mut session,
            CurrencyKind::Usdt,
            Some(NetworkKind::Bep20),
            "pro",
        );

        assert_eq!(selection.plan, "pro");
        assert_eq!(session.network, Some(NetworkKind::Bep20));
        assert_eq!(session.plan.as_deref(), Some("pro"));
    }

    #[test]
    fn test_submit_wallet_uses_selected_network() {
        let flow = flow();
        let mut session = flow.new_session();
        flow.select_plan(&mut session, CurrencyKind::Usdt, Some(NetworkKind::Bep20), "basic");

        let instructions = flow
            .submit_wallet(&mut session, CurrencyKind::Usdt, "buyer-wallet", dec!(1000))
            .unwrap();

        assert_eq!(instructions.network, NetworkKind::Bep20);
        assert_eq!(instructions.deposit_address, "unconfigured-usdt-bep20");
        assert_eq!(instructions.price, dec!(40));
        assert!(instructions.within_bounds);
    }

    #[test]
    fn test_submit_wallet_out_of_bounds_is_not_rejected() {
        let flow = flow();
        let mut session = flow.new_session();
        let instructions = flow
            .submit_wallet(&mut session, CurrencyKind::Bitcoin, "buyer", dec!(5))
            .unwrap();

        assert!(!instructions.within_bounds);
        assert_eq!(instructions.price, dec!(2500));
        assert_eq!(instructions.network, NetworkKind::Trc20);
    }

    #[test]
    fn test_submit_wallet_rejects_blank_wallet() {
        let flow = flow();
        let mut session = flow.new_session();
        let err = flow
            .submit_wallet(&mut session, CurrencyKind::Bitcoin, "  ", dec!(0.1))
            .unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidInput(_)));
        assert!(session.quote.is_none());
    }

    #[tokio::test]
    async fn test_verify_payment_requires_quote() {
        let flow = flow();
        let mut session = flow.new_session();
        let err = flow.verify_payment(&mut session, "ref").await.unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_success_without_transaction_redirects() {
        let flow = flow();
        let mut session = flow.new_session();
        assert_eq!(flow.success(&mut session).await.unwrap(), SuccessView::RedirectToStart);

        session.transaction_id = TransactionId::parse("UNKNOWNID0000000");
        assert_eq!(flow.success(&mut session).await.unwrap(), SuccessView::RedirectToStart);
    }

    #[tokio::test]
    async fn test_reset_clears_session() {
        let flow = flow();
        let mut session = flow.new_session();
        flow.submit_wallet(&mut session, CurrencyKind::Bitcoin, "buyer", dec!(0.1))
            .unwrap();
        flow.verify_payment(&mut session, "ref").await.unwrap();

        assert_eq!(flow.reset(&mut session), RedirectToStart);
        assert!(session.is_empty());
        assert_eq!(flow.success(&mut session).await.unwrap(), SuccessView::RedirectToStart);
    }
}
