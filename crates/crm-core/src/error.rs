//! Error taxonomy for the CRM core
//!
//! Everything a use case can fail with. Validation failures carry the field
//! they belong to so a form layer can attach the message to the right input;
//! `field: None` means the error concerns the form as a whole.

use thiserror::Error;

use crm_common::{AccessError, ModerationError};

use crate::ports::outbound::RepositoryError;

/// A business-rule violation tied to a field (or to the whole form)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    field: Option<&'static str>,
    message: String,
}

impl ValidationError {
    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            message: message.into(),
        }
    }

    pub fn form(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    pub fn field_code(&self) -> Option<&'static str> {
        self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Top-level error type returned by every use case
#[derive(Error, Debug)]
pub enum CrmError {
    #[error(transparent)]
    PermissionDenied(AccessError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    ForbiddenWord(ModerationError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    ExternalCheckFailed(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl CrmError {
    /// Field code for the form layer, when one applies
    pub fn field_code(&self) -> Option<&'static str> {
        match self {
            Self::Validation(e) => e.field_code(),
            Self::ForbiddenWord(ModerationError::ForbiddenWord { field }) => Some(*field),
            _ => None,
        }
    }
}

impl From<AccessError> for CrmError {
    fn from(e: AccessError) -> Self {
        Self::PermissionDenied(e)
    }
}

impl From<ModerationError> for CrmError {
    fn from(e: ModerationError) -> Self {
        match e {
            ModerationError::ForbiddenWord { .. } => Self::ForbiddenWord(e),
            ModerationError::ListUnavailable(msg) => Self::Persistence(msg),
        }
    }
}

impl From<RepositoryError> for CrmError {
    fn from(e: RepositoryError) -> Self {
        Self::Persistence(e.to_string())
    }
}
