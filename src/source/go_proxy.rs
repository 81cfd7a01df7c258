//! Go Module Proxy version source
//!
//! Lists the tagged versions of a module through the proxy protocol:
//! - List versions: https://proxy.golang.org/{module}/@v/list

use crate::error::SourceError;
use crate::source::{HttpClient, VersionSource};
use async_trait::async_trait;
use std::collections::BTreeSet;
use tracing::debug;

/// Go Module Proxy base URL
pub const GO_PROXY_URL: &str = "https://proxy.golang.org";

/// Version source backed by a Go module proxy
pub struct GoProxySource {
    client: HttpClient,
    base_url: String,
}

impl GoProxySource {
    /// Create a source for the public Go proxy
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, GO_PROXY_URL)
    }

    /// Create a source for a custom proxy
    pub fn with_base_url(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the URL for listing versions
    fn build_list_url(&self, module: &str) -> String {
        format!("{}/{}/@v/list", self.base_url, Self::encode_module_path(module))
    }

    /// Encode a module path the way the proxy expects: uppercase letters
    /// become `!` followed by the lowercase letter
    fn encode_module_path(module: &str) -> String {
        let mut encoded = String::with_capacity(module.len());

        for ch in module.chars() {
            if ch.is_uppercase() {
                encoded.push('!');
                for lower in ch.to_lowercase() {
                    encoded.push(lower);
                }
            } else {
                encoded.push(ch);
            }
        }

        encoded
    }
}

#[async_trait]
impl VersionSource for GoProxySource {
    fn name(&self) -> &'static str {
        "Go Proxy"
    }

    async fn fetch(&self, module: &str) -> Result<BTreeSet<String>, SourceError> {
        let url = self.build_list_url(module);
        debug!("listing versions of {} from {}", module, url);

        let body = self.client.get_text(&url, module, self.name()).await?;
        let versions: BTreeSet<String> = body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        if versions.is_empty() {
            return Err(SourceError::empty(module, self.name()));
        }

        Ok(versions)
    }
}
