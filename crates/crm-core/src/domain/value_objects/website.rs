//! Website Value Object
//!
//! Campaign websites must be served over HTTPS. Scheme-less input is
//! normalized by prefixing `https://`; an explicit `http://` is rejected
//! rather than silently upgraded.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Website(String);

impl Website {
    pub fn new(value: impl Into<String>) -> Result<Self, WebsiteError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(WebsiteError::Empty);
        }

        if value.starts_with("http://") {
            return Err(WebsiteError::InsecureScheme);
        }

        let url = if value.starts_with("https://") {
            value
        } else {
            format!("https://{value}")
        };

        if url.len() <= "https://".len() {
            return Err(WebsiteError::Empty);
        }

        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Website {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Website {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebsiteError {
    #[error("A website is required.")]
    Empty,

    #[error("The website must be served over https.")]
    InsecureScheme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemeless_input_is_prefixed() {
        let site = Website::new("example.com").unwrap();
        assert_eq!(site.as_str(), "https://example.com");
    }

    #[test]
    fn test_https_input_unchanged() {
        let site = Website::new("https://example.com").unwrap();
        assert_eq!(site.as_str(), "https://example.com");
    }

    #[test]
    fn test_http_is_rejected() {
        assert_eq!(
            Website::new("http://example.com").unwrap_err(),
            WebsiteError::InsecureScheme
        );
    }

    #[test]
    fn test_empty_is_rejected() {
        assert_eq!(Website::new("  ").unwrap_err(), WebsiteError::Empty);
        assert_eq!(Website::new("https://").unwrap_err(), WebsiteError::Empty);
    }
}
