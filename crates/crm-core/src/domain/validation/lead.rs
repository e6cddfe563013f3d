//! Lead rules
//!
//! Order: first/middle/last name → email → phone. Campaign existence and
//! the role check run in the service afterwards.

use crate::domain::value_objects::{Email, Phone};
use crate::error::ValidationError;

/// A person name is one token: internal whitespace means several words,
/// which is rejected; a hyphenated name counts as one token.
pub fn validate_person_name(
    name: &str,
    field: &'static str,
    label: &str,
) -> Result<(), ValidationError> {
    if name.split_whitespace().count() > 1 {
        return Err(ValidationError::field(
            field,
            format!("{label} must consist of a single word or be separated by '-'."),
        ));
    }
    if name.trim().chars().count() < 2 {
        return Err(ValidationError::field(
            field,
            format!("{label} must contain at least 2 characters."),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<Email, ValidationError> {
    Email::new(email).map_err(|e| ValidationError::field("email", e.to_string()))
}

pub fn validate_phone(phone: &str) -> Result<Phone, ValidationError> {
    Phone::new(phone).map_err(|e| ValidationError::field("phone", e.to_string()))
}

/// All field rules in order, first failure wins. Returns the parsed
/// email and phone for the caller to persist.
pub fn validate(
    first_name: &str,
    middle_name: Option<&str>,
    last_name: &str,
    email: &str,
    phone: &str,
) -> Result<(Email, Phone), ValidationError> {
    validate_person_name(first_name, "first_name", "First name")?;
    if let Some(middle) = middle_name {
        validate_person_name(middle, "middle_name", "Middle name")?;
    }
    validate_person_name(last_name, "last_name", "Last name")?;
    let email = validate_email(email)?;
    let phone = validate_phone(phone)?;
    Ok((email, phone))
}
