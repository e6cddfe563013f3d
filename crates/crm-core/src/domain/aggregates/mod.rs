//! Aggregates module

pub mod campaign;
pub mod channel;
pub mod contract;
pub mod customer;
pub mod lead;
pub mod product;

pub use campaign::{Campaign, Country};
pub use channel::PromotionChannel;
pub use contract::Contract;
pub use customer::Customer;
pub use lead::Lead;
pub use product::{Product, ProductStatus};
