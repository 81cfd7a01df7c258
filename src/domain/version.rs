//! Semantic version normalization and ordering
//!
//! Tags are published in many shapes (`v1.2.3`, `1.2.3`, `v1.2.3^{}`), so every
//! raw string goes through [`normalize`] before it is compared. Ordering follows
//! semantic-version precedence: build metadata never affects `cmp` or `==`.

use crate::error::VersionError;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Marker git appends to the peeled entry of an annotated tag
const ANNOTATED_TAG_SUFFIX: &str = "^{}";

/// Prefix carried by canonical version strings
const VERSION_PREFIX: char = 'v';

/// A validated semantic version in canonical `v`-prefixed form
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    inner: semver::Version,
}

/// Normalize a raw tag or version string into a [`SemanticVersion`]
///
/// Steps:
/// 1. trim surrounding whitespace
/// 2. strip a trailing annotated-tag marker (`^{}`)
/// 3. prepend `v` when missing
/// 4. validate the remainder as a semantic version; the Go-style shorthands
///    `vMAJOR` and `vMAJOR.MINOR` are padded with zeros
///
/// The error keeps the original input for diagnostics.
pub fn normalize(raw: &str) -> Result<SemanticVersion, VersionError> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_suffix(ANNOTATED_TAG_SUFFIX)
        .unwrap_or(trimmed);

    let core = match trimmed.strip_prefix(VERSION_PREFIX) {
        Some(rest) => rest,
        None => trimmed,
    };

    if core.is_empty() {
        return Err(VersionError::invalid(raw));
    }

    if let Ok(inner) = semver::Version::parse(core) {
        return Ok(SemanticVersion { inner });
    }

    expand_shorthand(core)
        .and_then(|full| semver::Version::parse(&full).ok())
        .map(|inner| SemanticVersion { inner })
        .ok_or_else(|| VersionError::invalid(raw))
}

/// Pad `1` and `1.2` to three components. Shorthands never carry pre-release
/// or build metadata.
fn expand_shorthand(core: &str) -> Option<String> {
    if core.contains(['-', '+']) {
        return None;
    }

    let parts: Vec<&str> = core.split('.').collect();
    if parts
        .iter()
        .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    match parts.len() {
        1 => Some(format!("{}.0.0", parts[0])),
        2 => Some(format!("{}.{}.0", parts[0], parts[1])),
        _ => None,
    }
}

impl SemanticVersion {
    /// Major component
    pub fn major(&self) -> u64 {
        self.inner.major
    }

    /// Minor component
    pub fn minor(&self) -> u64 {
        self.inner.minor
    }

    /// Patch component
    pub fn patch(&self) -> u64 {
        self.inner.patch
    }

    /// Pre-release identifiers, empty for a release
    pub fn pre(&self) -> &str {
        self.inner.pre.as_str()
    }

    /// Build metadata, empty when absent
    pub fn build(&self) -> &str {
        self.inner.build.as_str()
    }

    /// Returns true if this version carries pre-release identifiers
    pub fn is_prerelease(&self) -> bool {
        !self.inner.pre.is_empty()
    }

    /// Total order including build metadata, used only to make tie-breaks
    /// between equal-precedence versions deterministic
    pub fn cmp_with_build(&self, other: &Self) -> Ordering {
        self.cmp(other)
            .then_with(|| self.inner.build.cmp(&other.inner.build))
    }

    /// Borrow the underlying `semver::Version`
    pub fn as_semver(&self) -> &semver::Version {
        &self.inner
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (&self.inner, &other.inner);
        a.major
            .cmp(&b.major)
            .then_with(|| a.minor.cmp(&b.minor))
            .then_with(|| a.patch.cmp(&b.patch))
            // semver::Prerelease orders an empty pre-release above any identifiers
            .then_with(|| a.pre.cmp(&b.pre))
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", VERSION_PREFIX, self.inner)
    }
}

impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
