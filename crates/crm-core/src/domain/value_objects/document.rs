//! Contract document reference
//!
//! The core never stores file bytes; it records which file backs a contract
//! and enforces the upload rules (PDF/DOCX only, at most 10 MB).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum accepted document size
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 2] = [".pdf", ".docx"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    filename: String,
    size_bytes: u64,
}

impl DocumentRef {
    pub fn new(filename: impl Into<String>, size_bytes: u64) -> Result<Self, DocumentError> {
        let filename = filename.into().trim().to_string();

        if filename.is_empty() {
            return Err(DocumentError::Empty);
        }

        let lowered = filename.to_lowercase();
        if !ALLOWED_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext)) {
            return Err(DocumentError::UnsupportedExtension);
        }

        if size_bytes > MAX_DOCUMENT_BYTES {
            return Err(DocumentError::TooLarge {
                size_mb: size_bytes / (1024 * 1024),
            });
        }

        Ok(Self {
            filename,
            size_bytes,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filename)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("A contract document is required.")]
    Empty,

    #[error("Only PDF and DOCX files are allowed.")]
    UnsupportedExtension,

    #[error("The file size cannot exceed 10 MB. Your file size: {size_mb} MB")]
    TooLarge { size_mb: u64 },
}
