//! Adapters implementing the domain ports.

pub mod clock;
pub mod id_source;
pub mod in_memory;
