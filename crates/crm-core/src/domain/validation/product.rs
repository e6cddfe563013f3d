//! Product rules
//!
//! Order: name → description → cost → discount → status/archived.
//! Uniqueness, bad words and the role check run in the service afterwards.

use crate::domain::aggregates::ProductStatus;
use crate::error::ValidationError;

/// Characters a service name may never contain
const FORBIDDEN_NAME_CHARS: [char; 16] = [
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '"', '`', '{', '}', '/', '\\',
];

/// Highest discount the business hands out, in percent
pub const MAX_DISCOUNT: u8 = 50;

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().count() < 3 {
        return Err(ValidationError::field(
            "name",
            "Name must contain at least 3 characters.",
        ));
    }

    if name.chars().any(|c| FORBIDDEN_NAME_CHARS.contains(&c)) {
        return Err(ValidationError::field(
            "name",
            "Name contains illegal characters.",
        ));
    }

    if name.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::field(
            "name",
            "Name cannot consist only of digits.",
        ));
    }

    if digit_run_count(name) > 1 {
        return Err(ValidationError::field(
            "name",
            "Name can contain no more than one number.",
        ));
    }

    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.chars().count() < 10 {
        return Err(ValidationError::field(
            "description",
            "Description must contain at least 10 characters.",
        ));
    }
    Ok(())
}

pub fn validate_cost(cost: f64) -> Result<(), ValidationError> {
    if cost == 0.0 {
        return Err(ValidationError::field(
            "cost",
            "The service cannot be free. Specify a cost greater than zero.",
        ));
    }
    if cost < 0.0 {
        return Err(ValidationError::field(
            "cost",
            "The cost cannot be negative.",
        ));
    }
    Ok(())
}

pub fn validate_discount(cost: f64, discount: u8) -> Result<(), ValidationError> {
    if discount > MAX_DISCOUNT {
        return Err(ValidationError::field(
            "discount",
            format!("Discount cannot exceed {MAX_DISCOUNT}%."),
        ));
    }
    if f64::from(discount) >= cost {
        return Err(ValidationError::field(
            "discount",
            "Discount cannot be greater than or equal to cost.",
        ));
    }
    Ok(())
}

pub fn validate_status_and_archived(
    status: ProductStatus,
    archived: bool,
) -> Result<(), ValidationError> {
    if archived && status == ProductStatus::Active {
        return Err(ValidationError::field(
            "status",
            "Archived products cannot be active.",
        ));
    }
    Ok(())
}

/// All field rules in order, first failure wins
pub fn validate(
    name: &str,
    description: &str,
    cost: f64,
    discount: u8,
    status: ProductStatus,
    archived: bool,
) -> Result<(), ValidationError> {
    validate_name(name)?;
    validate_description(description)?;
    validate_cost(cost)?;
    validate_discount(cost, discount)?;
    validate_status_and_archived(status, archived)?;
    Ok(())
}

/// Number of distinct runs of consecutive digits in `s`
fn digit_run_count(s: &str) -> usize {
    let mut runs = 0;
    let mut in_run = false;
    for c in s.chars() {
        if c.is_ascii_digit() {
            if !in_run {
                runs += 1;
                in_run = true;
            }
        } else {
            in_run = false;
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_too_short() {
        assert!(validate_name("AB").is_err());
        assert!(validate_name("ABC").is_ok());
    }

    #[test]
    fn test_name_valid() {
        assert!(validate_name("Valid Name").is_ok());
    }

    #[test]
    fn test_name_illegal_characters() {
        for bad in ["Site (new)", "Promo!", "a/b testing", "Back\\slash", "Quo\"te"] {
            assert!(validate_name(bad).is_err(), "{bad:?} should be rejected");
        }
        assert!(validate_name("Plain name").is_ok());
    }

    #[test]
    fn test_name_all_digits() {
        assert!(validate_name("12345").is_err());
    }

    #[test]
    fn test_name_multiple_digit_runs() {
        // Two runs: "2024" and "2".
        assert!(validate_name("Plan 2024 v2").is_err());
        // One run is fine.
        assert!(validate_name("Plan 2024").is_ok());
    }

    #[test]
    fn test_description_length() {
        assert!(validate_description("too short").is_err());
        assert!(validate_description("long enough text").is_ok());
    }

    #[test]
    fn test_cost_zero_and_negative_are_distinct() {
        let free = validate_cost(0.0).unwrap_err();
        assert!(free.message().contains("free"));

        let negative = validate_cost(-5.0).unwrap_err();
        assert!(negative.message().contains("negative"));

        assert!(validate_cost(0.01).is_ok());
    }

    #[test]
    fn test_discount_rules() {
        assert!(validate_discount(1000.0, 50).is_ok());
        assert!(validate_discount(1000.0, 51).is_err());
        // The discount figure must stay below the cost figure.
        assert!(validate_discount(30.0, 30).is_err());
        assert!(validate_discount(30.0, 29).is_ok());
    }

    #[test]
    fn test_archived_active_conflict() {
        assert!(validate_status_and_archived(ProductStatus::Active, true).is_err());
        assert!(validate_status_and_archived(ProductStatus::Inactive, true).is_ok());
        assert!(validate_status_and_archived(ProductStatus::Active, false).is_ok());
    }

    #[test]
    fn test_aggregate_validate_reports_first_failure() {
        let err = validate("AB", "x", -1.0, 99, ProductStatus::Active, true).unwrap_err();
        assert_eq!(err.field_code(), Some("name"));
    }
}
