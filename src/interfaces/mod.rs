//! Inbound adapters: configuration readers used by the binary.

pub mod json;
