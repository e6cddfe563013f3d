//! Ports layer
//!
//! Hexagonal architecture interfaces: inbound use cases exposed to the
//! form/API layer, outbound dependencies the core consumes.

pub mod inbound;
pub mod outbound;
