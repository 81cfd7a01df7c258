//! HTTP client shared by network-backed version sources
//!
//! This module provides:
//! - Configurable timeout and User-Agent
//! - Status mapping onto SourceError (404/410 as module not found)
//!
//! Requests are never retried; a failed fetch is terminal for that module.

use crate::error::SourceError;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("outdatedcheck/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, SourceError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                SourceError::fetch_failed("", "HTTP client", format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, timeout })
    }

    /// Create a client with the default User-Agent and the given timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, SourceError> {
        Self::with_config(timeout, DEFAULT_USER_AGENT)
    }

    /// Configured request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform a GET request and return the body as text
    pub async fn get_text(
        &self,
        url: &str,
        module: &str,
        source_name: &str,
    ) -> Result<String, SourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e, module, source_name))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(SourceError::not_found(module, source_name));
        }
        if !status.is_success() {
            return Err(SourceError::fetch_failed(
                module,
                source_name,
                format!("HTTP {}", status),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e, module, source_name))
    }

    fn map_transport_error(&self, e: reqwest::Error, module: &str, source_name: &str) -> SourceError {
        if e.is_timeout() {
            SourceError::timeout(module, self.timeout.as_secs())
        } else {
            SourceError::fetch_failed(module, source_name, e.to_string())
        }
    }
}
