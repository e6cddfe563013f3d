//! Contract rules
//!
//! Order: dates → document → cost. Product existence and the role check
//! run in the service; the cost-decrease rule compares against the stored
//! row the service read.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::value_objects::DocumentRef;
use crate::error::ValidationError;

/// Shortest and longest accepted contract durations
pub const MIN_DURATION_DAYS: i64 = 1;
pub const MAX_DURATION_DAYS: i64 = 365 * 5;

/// Largest accepted cost reduction for a non-superuser, as a fraction of
/// the stored cost
const COST_FLOOR_RATIO: Decimal = Decimal::from_parts(7, 0, 0, false, 1); // 0.7

/// Ordering and duration rules, shared by creation and update
pub fn validate_date_window(
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(), ValidationError> {
    if start_date > end_date {
        return Err(ValidationError::field(
            "start_date",
            "Start date must be earlier than end date.",
        ));
    }

    let duration = (end_date - start_date).num_days();
    if duration < MIN_DURATION_DAYS {
        return Err(ValidationError::field(
            "end_date",
            "The contract duration must be at least 1 day.",
        ));
    }
    if duration > MAX_DURATION_DAYS {
        return Err(ValidationError::field(
            "end_date",
            "The contract duration cannot exceed 5 years.",
        ));
    }

    Ok(())
}

/// Creation rules: the window rules plus the start date not being in the
/// past. Running contracts keep validating on update without this check.
pub fn validate_dates(
    start_date: NaiveDate,
    end_date: NaiveDate,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if start_date > end_date {
        return Err(ValidationError::field(
            "start_date",
            "Start date must be earlier than end date.",
        ));
    }

    if start_date < today {
        return Err(ValidationError::field(
            "start_date",
            "Start date must not be earlier than today.",
        ));
    }

    validate_date_window(start_date, end_date)
}

/// Upload rules live in the value object; this adapts its errors to the
/// field-coded form.
pub fn validate_document(filename: &str, size_bytes: u64) -> Result<DocumentRef, ValidationError> {
    DocumentRef::new(filename, size_bytes)
        .map_err(|e| ValidationError::field("document", e.to_string()))
}

pub fn validate_cost(cost: Decimal) -> Result<(), ValidationError> {
    if cost <= Decimal::ZERO {
        return Err(ValidationError::field("cost", "The cost is invalid."));
    }
    Ok(())
}

/// On update a non-superuser may not reduce the cost below 70% of the
/// stored value. The error carries the current value and the floor.
pub fn validate_cost_update(
    new_cost: Decimal,
    current_cost: Decimal,
    is_superuser: bool,
) -> Result<(), ValidationError> {
    validate_cost(new_cost)?;

    if is_superuser {
        return Ok(());
    }

    let floor = (current_cost * COST_FLOOR_RATIO).round_dp(2);
    if new_cost < floor {
        return Err(ValidationError::field(
            "cost",
            format!(
                "Cost reduction exceeds 30% limit. Current value: {current_cost}. \
                 Minimum allowed: {floor}"
            ),
        ));
    }
    Ok(())
}

/// All creation rules in order, first failure wins. Returns the validated
/// document reference.
pub fn validate(
    start_date: NaiveDate,
    end_date: NaiveDate,
    today: NaiveDate,
    filename: &str,
    size_bytes: u64,
    cost: Decimal,
) -> Result<DocumentRef, ValidationError> {
    validate_dates(start_date, end_date, today)?;
    let document = validate_document(filename, size_bytes)?;
    validate_cost(cost)?;
    Ok(document)
}
