//! Domain layer: value objects, the transaction record, and the ports the
//! application layer depends on.

pub mod address;
pub mod currency;
pub mod ports;
pub mod quote;
pub mod session;
pub mod transaction;
