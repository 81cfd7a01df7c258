//! Run configuration
//!
//! Settings come from `.outdatedcheck.toml` in the project directory (or an
//! explicit `--config` file) and are then overridden by CLI flags. The value
//! is built once per run and passed down explicitly.
//!
//! ```toml
//! module_prefix = "git.example.net/"
//! concurrency = 8
//! timeout_secs = 20
//! source = "proxy"
//! proxy_url = "https://goproxy.example.net"
//! include_prerelease = false
//! ```

use crate::error::ConfigError;
use crate::resolver::ResolverConfig;
use crate::source::SourceKind;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the project directory
pub const CONFIG_FILENAME: &str = ".outdatedcheck.toml";

/// Default number of concurrent fetches
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Default per-fetch timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Effective configuration for one run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Only requirements whose path starts with this prefix are checked
    pub module_prefix: String,
    /// Maximum number of fetches in flight
    pub concurrency: usize,
    /// Per-fetch deadline in seconds
    pub timeout_secs: u64,
    /// Where candidate versions come from
    pub source: SourceKind,
    /// Go proxy base URL for `source = "proxy"`
    pub proxy_url: Option<String>,
    /// JSON tag table for `source = "file"`
    pub tags_file: Option<PathBuf>,
    /// Whether pre-release tags may be reported as latest
    pub include_prerelease: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            module_prefix: String::new(),
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            source: SourceKind::default(),
            proxy_url: None,
            tags_file: None,
            include_prerelease: true,
        }
    }
}

impl Config {
    /// Parse a config file; a relative `tags_file` is resolved against the
    /// file's directory
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if let Some(dir) = path.parent() {
            config.tags_file = config.tags_file.take().map(|tags_file| {
                if tags_file.is_relative() {
                    dir.join(tags_file)
                } else {
                    tags_file
                }
            });
        }

        Ok(config)
    }

    /// Load the configuration for a project
    ///
    /// An explicit file must exist. Without one, `CONFIG_FILENAME` in
    /// `project_dir` is used when present, otherwise defaults.
    pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let default_path = project_dir.join(CONFIG_FILENAME);
        if default_path.is_file() {
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject values the resolver cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::invalid_value("concurrency", "must be at least 1"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid_value("timeout_secs", "must be at least 1"));
        }
        Ok(())
    }

    /// Per-fetch deadline
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolver settings derived from this configuration
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            concurrency: self.concurrency,
            timeout: self.timeout(),
            include_prerelease: self.include_prerelease,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.module_prefix, "");
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.source, SourceKind::Git);
        assert!(config.include_prerelease);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path(), None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_project_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            "module_prefix = \"git.example.net/\"\nconcurrency = 4\nsource = \"proxy\"\n",
        )
        .unwrap();

        let config = Config::load(dir.path(), None).unwrap();
        assert_eq!(config.module_prefix, "git.example.net/");
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.source, SourceKind::Proxy);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load(dir.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_unknown_key_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("c.toml");
        fs::write(&path, "module_prefx = \"typo\"\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_relative_tags_file_resolved_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("c.toml");
        fs::write(&path, "source = \"file\"\ntags_file = \"tags.json\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.tags_file, Some(dir.path().join("tags.json")));
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = Config {
            concurrency: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolver_config() {
        let config = Config {
            concurrency: 3,
            timeout_secs: 5,
            include_prerelease: false,
            ..Config::default()
        };
        let resolver_config = config.resolver_config();
        assert_eq!(resolver_config.concurrency, 3);
        assert_eq!(resolver_config.timeout, Duration::from_secs(5));
        assert!(!resolver_config.include_prerelease);
    }
}
