//! Declared module requirement

use super::version::{normalize, SemanticVersion};
use crate::error::VersionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A module declared by the manifest together with its pinned version
///
/// `pinned_version` is kept verbatim; it may not be a valid version at all.
/// Manifest parsers guarantee `path` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Module path (e.g. `example.org/lib`)
    pub path: String,
    /// Version string as written in the manifest
    pub pinned_version: String,
    /// Whether the manifest marks this requirement as indirect
    #[serde(default)]
    pub indirect: bool,
}

impl Requirement {
    /// Creates a new direct requirement
    pub fn new(path: impl Into<String>, pinned_version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            pinned_version: pinned_version.into(),
            indirect: false,
        }
    }

    /// Marks the requirement as indirect (builder pattern)
    pub fn with_indirect(mut self, indirect: bool) -> Self {
        self.indirect = indirect;
        self
    }

    /// Normalized pinned version
    pub fn pinned(&self) -> Result<SemanticVersion, VersionError> {
        normalize(&self.pinned_version)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.indirect { " (indirect)" } else { "" };
        write!(f, "{}@{}{}", self.path, self.pinned_version, marker)
    }
}
