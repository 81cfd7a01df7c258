//! Version sources: where candidate tags for a module come from
//!
//! This module provides:
//! - The VersionSource trait the resolver fetches through
//! - git ls-remote source (default)
//! - Go Module Proxy source
//! - Static path -> versions table (tests and offline runs)

mod client;
mod git;
mod go_proxy;
mod static_table;

pub use client::{HttpClient, DEFAULT_TIMEOUT};
pub use git::GitTagSource;
pub use go_proxy::{GoProxySource, GO_PROXY_URL};
pub use static_table::StaticSource;

use crate::config::Config;
use crate::error::{AppError, ConfigError, SourceError};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Trait for version sources
///
/// `fetch` returns the complete set of raw tags known for a module in one
/// call. Tags are not validated here; the resolver normalizes them.
#[async_trait]
pub trait VersionSource: Send + Sync {
    /// Human-readable source name used in diagnostics
    fn name(&self) -> &'static str;

    /// Fetch all candidate version strings for a module
    async fn fetch(&self, module: &str) -> Result<BTreeSet<String>, SourceError>;
}

/// Selectable version source backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// `git ls-remote --tags` on the module path (vanity import paths are not resolved)
    #[default]
    Git,
    /// Go module proxy `@v/list`
    Proxy,
    /// JSON tag table on disk
    File,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Git => write!(f, "git"),
            SourceKind::Proxy => write!(f, "proxy"),
            SourceKind::File => write!(f, "file"),
        }
    }
}

/// Create the version source selected by the configuration
pub fn create_source(config: &Config) -> Result<Arc<dyn VersionSource>, AppError> {
    match config.source {
        SourceKind::Git => Ok(Arc::new(GitTagSource::new())),
        SourceKind::Proxy => {
            let client = HttpClient::with_timeout(config.timeout())?;
            let url = config.proxy_url.as_deref().unwrap_or(GO_PROXY_URL);
            Ok(Arc::new(GoProxySource::with_base_url(client, url)))
        }
        SourceKind::File => {
            let path = config.tags_file.as_deref().ok_or_else(|| {
                ConfigError::invalid_value("tags_file", "required when source is 'file'")
            })?;
            Ok(Arc::new(StaticSource::from_json_file(path)?))
        }
    }
}
