//! Campaign rules
//!
//! Order: name → budget → country → website scheme. Channel existence,
//! uniqueness, bad words, the liveness probe and the role check run in the
//! service afterwards.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::domain::aggregates::Country;
use crate::domain::value_objects::Website;
use crate::error::ValidationError;

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().count() < 3 {
        return Err(ValidationError::field(
            "name",
            "Name must contain at least 3 characters.",
        ));
    }
    Ok(())
}

/// The budget must cover at least one unit of the promoted product.
pub fn validate_budget(budget: Decimal, product_cost: f64) -> Result<(), ValidationError> {
    let cost = Decimal::from_f64(product_cost).unwrap_or_default();
    if budget < cost {
        return Err(ValidationError::field(
            "budget",
            "The budget cannot be less than the cost of the product.",
        ));
    }
    Ok(())
}

pub fn validate_country(country: Option<Country>) -> Result<Country, ValidationError> {
    country.ok_or_else(|| ValidationError::field("country", "A country is required."))
}

/// Scheme rules live in the value object; this adapts its errors to the
/// field-coded form.
pub fn validate_website(website: &str) -> Result<Website, ValidationError> {
    Website::new(website).map_err(|e| ValidationError::field("website", e.to_string()))
}

/// All field rules in order, first failure wins. Returns the normalized
/// website and resolved country for the caller to persist.
pub fn validate(
    name: &str,
    budget: Decimal,
    product_cost: f64,
    country: Option<Country>,
    website: &str,
) -> Result<(Country, Website), ValidationError> {
    validate_name(name)?;
    validate_budget(budget, product_cost)?;
    let country = validate_country(country)?;
    let website = validate_website(website)?;
    Ok((country, website))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_length() {
        assert!(validate_name("A").is_err());
        assert!(validate_name("Valid Name").is_ok());
    }

    #[test]
    fn test_budget_must_cover_product_cost() {
        assert!(validate_budget(Decimal::new(100, 0), 99.0).is_ok());
        assert!(validate_budget(Decimal::new(100, 0), 100.0).is_ok());
        assert!(validate_budget(Decimal::new(100, 0), 101.0).is_err());
    }

    #[test]
    fn test_country_required() {
        assert!(validate_country(None).is_err());
        assert_eq!(
            validate_country(Some(Country::France)).unwrap(),
            Country::France
        );
    }

    #[test]
    fn test_website_normalization() {
        let site = validate_website("example.com").unwrap();
        assert_eq!(site.as_str(), "https://example.com");

        let site = validate_website("https://example.com").unwrap();
        assert_eq!(site.as_str(), "https://example.com");

        let err = validate_website("http://www.example.com").unwrap_err();
        assert_eq!(err.field_code(), Some("website"));
        assert!(err.message().contains("https"));
    }

    #[test]
    fn test_aggregate_validate() {
        let (country, website) = validate(
            "Spring Launch",
            Decimal::new(5000, 0),
            1000.0,
            Some(Country::Germany),
            "example.com",
        )
        .unwrap();
        assert_eq!(country, Country::Germany);
        assert_eq!(website.as_str(), "https://example.com");

        // Budget failure is reported before the missing country.
        let err = validate("Spring Launch", Decimal::ZERO, 1000.0, None, "example.com")
            .unwrap_err();
        assert_eq!(err.field_code(), Some("budget"));
    }
}
