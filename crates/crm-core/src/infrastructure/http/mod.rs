//! Outbound HTTP
//!
//! The website liveness check behind the `WebsiteProber` port: one GET
//! with a 5-second timeout, status code passed back to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::ports::outbound::{ProbeError, WebsiteProber};

/// How long a probe may block the calling request
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct ReqwestWebsiteProber {
    client: Client,
}

impl ReqwestWebsiteProber {
    pub fn new() -> Self {
        // Fails only when the TLS backend cannot initialize, the same
        // condition `Client::new` panics on.
        let client = Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }
}

impl Default for ReqwestWebsiteProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebsiteProber for ReqwestWebsiteProber {
    async fn probe(&self, url: &str) -> Result<u16, ProbeError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProbeError::Network(e.to_string()))?;

        Ok(response.status().as_u16())
    }
}
