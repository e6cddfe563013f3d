//! Customer rules
//!
//! A customer is a converted lead: the lead must exist and must not already
//! have a customer, and the contract must exist. Existence is checked in
//! the service; the one-to-one rule is also enforced by the store.

use crate::domain::aggregates::Customer;
use crate::error::ValidationError;

/// The one-to-one rule: a lead converts at most once.
pub fn ensure_lead_available(existing: Option<&Customer>) -> Result<(), ValidationError> {
    match existing {
        Some(_) => Err(ValidationError::field(
            "lead",
            "This lead already has a customer.",
        )),
        None => Ok(()),
    }
}
