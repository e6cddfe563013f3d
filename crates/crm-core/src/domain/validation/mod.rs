//! Business-rule validators
//!
//! Pure, independently callable rules plus one aggregate `validate` per
//! entity. Policy: fail fast. The first failing rule is reported, one
//! error at a time, in the order the per-entity module documents.

pub mod campaign;
pub mod contract;
pub mod customer;
pub mod lead;
pub mod product;
