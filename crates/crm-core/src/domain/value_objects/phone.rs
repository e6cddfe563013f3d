//! Phone Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phone number, kept in a normalized digits-with-optional-plus form
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phone(String);

impl Phone {
    pub fn new(value: impl Into<String>) -> Result<Self, PhoneError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let has_plus = trimmed.starts_with('+');
        let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.len() < 7 || digits.len() > 15 {
            return Err(PhoneError::InvalidLength);
        }

        // Anything besides digits and common separators means a typo,
        // not formatting.
        let separators = [' ', '-', '(', ')', '.'];
        if trimmed
            .chars()
            .skip(usize::from(has_plus))
            .any(|c| !c.is_ascii_digit() && !separators.contains(&c))
        {
            return Err(PhoneError::InvalidCharacters);
        }

        let normalized = if has_plus {
            format!("+{digits}")
        } else {
            digits
        };
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhoneError {
    #[error("A phone number is required.")]
    Empty,

    #[error("Invalid phone number length.")]
    InvalidLength,

    #[error("Phone number contains invalid characters.")]
    InvalidCharacters,
}
