//! Manifest detection and requirement parsing
//!
//! This module provides functionality to:
//! - Locate the project manifest (go.mod)
//! - Parse declared requirements from go.mod or `go list -m -json` output
//! - Scope the resulting RequirementSet to a module path prefix

mod detector;
mod go_list;
mod go_mod;

pub use detector::{detect_manifest, ManifestInfo, GO_MOD_FILENAME};
pub use go_list::GoListParser;
pub use go_mod::GoModParser;

use crate::domain::Requirement;
use crate::error::ManifestError;
use std::path::Path;

/// Supported manifest encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    /// A go.mod file
    GoMod,
    /// Concatenated JSON objects from `go list -m -json all`
    GoListJson,
}

impl ManifestFormat {
    /// Guess the format from a file path
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ManifestFormat::GoListJson,
            _ => ManifestFormat::GoMod,
        }
    }

    /// Name used in parse diagnostics
    pub fn origin_name(&self) -> &'static str {
        match self {
            ManifestFormat::GoMod => "go.mod",
            ManifestFormat::GoListJson => "go list output",
        }
    }
}

/// Trait for parsing manifest data into requirements
pub trait ManifestParser {
    /// Parse requirements in declaration order
    fn parse(&self, content: &str) -> Result<Vec<Requirement>, ManifestError>;

    /// Returns the format this parser handles
    fn format(&self) -> ManifestFormat;
}

/// Get a manifest parser for the specified format
pub fn get_parser(format: ManifestFormat) -> Box<dyn ManifestParser> {
    match format {
        ManifestFormat::GoMod => Box::new(GoModParser),
        ManifestFormat::GoListJson => Box::new(GoListParser),
    }
}

/// Ordered requirements declared by one manifest
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequirementSet {
    requirements: Vec<Requirement>,
}

impl RequirementSet {
    /// Parse manifest data in the given format
    pub fn parse(content: &str, format: ManifestFormat) -> Result<Self, ManifestError> {
        let requirements = get_parser(format).parse(content)?;
        Ok(Self { requirements })
    }

    /// Keep only requirements whose path starts with `prefix`, preserving
    /// order. An empty prefix keeps everything.
    pub fn filter(&self, prefix: &str) -> Self {
        let requirements = self
            .requirements
            .iter()
            .filter(|r| r.path.starts_with(prefix))
            .cloned()
            .collect();
        Self { requirements }
    }

    /// Requirements in declaration order
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Iterate over requirements in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, Requirement> {
        self.requirements.iter()
    }

    /// Number of requirements
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Returns true if there are no requirements
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl From<Vec<Requirement>> for RequirementSet {
    fn from(requirements: Vec<Requirement>) -> Self {
        Self { requirements }
    }
}

impl IntoIterator for RequirementSet {
    type Item = Requirement;
    type IntoIter = std::vec::IntoIter<Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.requirements.into_iter()
    }
}

/// Read and parse a located manifest
pub fn parse_manifest(info: &ManifestInfo) -> Result<RequirementSet, ManifestError> {
    let content = std::fs::read_to_string(&info.path)
        .map_err(|e| ManifestError::read_error(&info.path, e))?;
    RequirementSet::parse(&content, info.format)
}
