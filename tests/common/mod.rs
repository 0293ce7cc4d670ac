#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, Utc};
use creepto_checkout::application::checkout::{CheckoutFlow, ProcessingView};
use creepto_checkout::application::policy::VerificationPolicy;
use creepto_checkout::domain::address::{AddressDirectory, PaymentAddressResolver};
use creepto_checkout::domain::currency::CurrencyKind;
use creepto_checkout::domain::ports::IdSourceRef;
use creepto_checkout::infrastructure::clock::ManualClock;
use creepto_checkout::infrastructure::id_source::RandomIdSource;
use creepto_checkout::infrastructure::in_memory::InMemoryTransactionStore;
use rust_decimal::Decimal;
use std::sync::Arc;

pub fn start_time() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(20_000)
}

pub fn flow_with_ids(ids: IdSourceRef) -> (CheckoutFlow, ManualClock) {
    let clock = ManualClock::new(start_time());
    let flow = CheckoutFlow::new(
        Box::new(InMemoryTransactionStore::new()),
        ids,
        Arc::new(clock.clone()),
        PaymentAddressResolver::new(AddressDirectory::default()),
        VerificationPolicy::default(),
    );
    (flow, clock)
}

pub fn flow() -> (CheckoutFlow, ManualClock) {
    flow_with_ids(Arc::new(RandomIdSource))
}

/// Runs the flow up to a created transaction.
pub async fn purchase(flow: &CheckoutFlow, currency: CurrencyKind, amount: Decimal) -> ProcessingView {
    let mut session = flow.new_session();
    flow.select_plan(&mut session, currency, None, "standard");
    flow.submit_wallet(&mut session, currency, "buyer-wallet", amount)
        .unwrap();
    flow.verify_payment(&mut session, "claimed-ref").await.unwrap()
}
