//! Command handlers
//!
//! One application service per entity. Every mutation walks the same
//! pipeline: field validation, cross-field checks against the store,
//! moderation, external checks, the role gate, and only then the write.
//! The first failing step aborts the call; nothing is persisted on failure.

pub mod campaign;
pub mod channel;
pub mod contract;
pub mod customer;
pub mod lead;
pub mod product;

pub use campaign::CampaignService;
pub use channel::seed_standard_channels;
pub use contract::ContractService;
pub use customer::CustomerService;
pub use lead::LeadService;
pub use product::ProductService;
