//! Network-level models: AS numbers and query targets.
mod asn;
mod target;

pub use asn::*;
pub use target::*;
