//! Fixed path -> versions table
//!
//! Deterministic source used in tests and for offline runs, where the table
//! is read from a JSON object mapping module paths to tag lists:
//!
//! ```json
//! { "example.org/lib": ["v1.0.0", "v1.1.0"] }
//! ```

use crate::error::{ConfigError, SourceError};
use crate::source::VersionSource;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// In-memory version source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSource {
    table: BTreeMap<String, BTreeSet<String>>,
}

impl StaticSource {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module and its tags (builder pattern)
    pub fn with_module<I, S>(mut self, module: impl Into<String>, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(module, versions);
        self
    }

    /// Add or replace a module's tags
    pub fn insert<I, S>(&mut self, module: impl Into<String>, versions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table
            .insert(module.into(), versions.into_iter().map(Into::into).collect());
    }

    /// Parse a JSON table
    pub fn from_json_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let table: BTreeMap<String, BTreeSet<String>> =
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self { table })
    }

    /// Load a JSON table from disk
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&content, path)
    }

    /// Number of modules in the table
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the table is empty
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[async_trait]
impl VersionSource for StaticSource {
    fn name(&self) -> &'static str {
        "tag table"
    }

    async fn fetch(&self, module: &str) -> Result<BTreeSet<String>, SourceError> {
        match self.table.get(module) {
            None => Err(SourceError::not_found(module, self.name())),
            Some(versions) if versions.is_empty() => Err(SourceError::empty(module, self.name())),
            Some(versions) => Ok(versions.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fetch_known_module() {
        let source = StaticSource::new().with_module("example.org/lib", ["v1.0.0", "v1.1.0"]);
        let versions = source.fetch("example.org/lib").await.unwrap();
        assert_eq!(versions.len(), 2);
        assert!(versions.contains("v1.1.0"));
    }

    #[tokio::test]
    async fn test_fetch_unknown_module() {
        let source = StaticSource::new();
        let err = source.fetch("example.org/missing").await.unwrap_err();
        assert_eq!(err, SourceError::not_found("example.org/missing", "tag table"));
    }

    #[tokio::test]
    async fn test_fetch_empty_entry() {
        let source = StaticSource::new().with_module("example.org/lib", Vec::<String>::new());
        let err = source.fetch("example.org/lib").await.unwrap_err();
        assert!(matches!(err, SourceError::EmptyResponse { .. }));
    }

    #[tokio::test]
    async fn test_fetch_does_not_mutate_table() {
        let source = StaticSource::new().with_module("example.org/lib", ["v1.0.0"]);
        let before = source.clone();
        let _ = source.fetch("example.org/lib").await;
        let _ = source.fetch("example.org/other").await;
        assert_eq!(source, before);
    }

    #[test]
    fn test_from_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tags.json");
        fs::write(&path, r#"{"example.org/lib": ["v1.0.0", "v1.1.0"], "b.org/x": []}"#).unwrap();

        let source = StaticSource::from_json_file(&path).unwrap();
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = StaticSource::from_json_str("[1, 2]", Path::new("tags.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_from_json_missing_file() {
        let err = StaticSource::from_json_file(Path::new("/nonexistent/tags.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
