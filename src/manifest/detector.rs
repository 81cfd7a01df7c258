//! Manifest file discovery
//!
//! A directory argument is searched for `go.mod`, walking up through its
//! ancestors until the filesystem root. A file argument is used as is.

use crate::error::ManifestError;
use crate::manifest::ManifestFormat;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the Go module manifest
pub const GO_MOD_FILENAME: &str = "go.mod";

/// A located manifest file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestInfo {
    /// Path to the manifest file
    pub path: PathBuf,
    /// How its contents are parsed
    pub format: ManifestFormat,
}

impl ManifestInfo {
    /// Creates a new ManifestInfo
    pub fn new(path: impl Into<PathBuf>, format: ManifestFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Directory containing the manifest
    pub fn project_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Locate the manifest for `start`
pub fn detect_manifest(start: &Path) -> Result<ManifestInfo, ManifestError> {
    if start.is_file() {
        return Ok(ManifestInfo::new(start, ManifestFormat::from_path(start)));
    }

    if !start.is_dir() {
        return Err(ManifestError::not_found(start));
    }

    for dir in start.ancestors() {
        let candidate = dir.join(GO_MOD_FILENAME);
        debug!("looking for manifest at {}", candidate.display());
        if candidate.is_file() {
            return Ok(ManifestInfo::new(candidate, ManifestFormat::GoMod));
        }
    }

    Err(ManifestError::not_found(start.join(GO_MOD_FILENAME)))
}
