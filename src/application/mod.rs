//! Application layer: the transaction registry, the verification state
//! machine, and the buyer-facing checkout flow that ties them together.
//!
//! All state lives in an injected `TransactionStore`; time and id
//! generation come in through the `Clock` and `IdSource` ports so every
//! threshold can be driven deterministically in tests.

pub mod checkout;
pub mod policy;
pub mod registry;
pub mod verification;
