//! Freshness verdict for a single requirement

use super::SemanticVersion;
use std::fmt;

/// Why a requirement could not be classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvableReason {
    /// The version source could not answer for the module
    FetchFailed(String),
    /// The pinned version is not a semantic version
    InvalidPinnedVersion(String),
    /// Every fetched candidate failed normalization
    NoValidVersionsFound,
    /// Valid candidates exist but all are pre-releases excluded by policy
    NoStableVersionsFound,
}

impl UnresolvableReason {
    /// Stable machine-readable identifier
    pub fn code(&self) -> &'static str {
        match self {
            UnresolvableReason::FetchFailed(_) => "fetch_failed",
            UnresolvableReason::InvalidPinnedVersion(_) => "invalid_pinned_version",
            UnresolvableReason::NoValidVersionsFound => "no_valid_versions_found",
            UnresolvableReason::NoStableVersionsFound => "no_stable_versions_found",
        }
    }
}

impl fmt::Display for UnresolvableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvableReason::FetchFailed(msg) => write!(f, "fetch failure: {}", msg),
            UnresolvableReason::InvalidPinnedVersion(raw) => {
                write!(f, "invalid pinned version '{}'", raw)
            }
            UnresolvableReason::NoValidVersionsFound => write!(f, "no valid versions found"),
            UnresolvableReason::NoStableVersionsFound => {
                write!(f, "no stable versions found (only pre-releases)")
            }
        }
    }
}

/// Result of resolving one requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The pin is at (or ahead of) the highest discovered version
    UpToDate {
        /// Highest version discovered by the source
        latest: SemanticVersion,
    },
    /// A strictly greater version exists
    Outdated {
        /// Highest version discovered by the source
        latest: SemanticVersion,
    },
    /// No verdict could be reached
    Unresolvable {
        /// The reason resolution stopped
        reason: UnresolvableReason,
    },
}

impl Classification {
    /// Creates an Unresolvable classification
    pub fn unresolvable(reason: UnresolvableReason) -> Self {
        Classification::Unresolvable { reason }
    }

    /// Returns true if a newer version exists
    pub fn is_outdated(&self) -> bool {
        matches!(self, Classification::Outdated { .. })
    }

    /// Returns true if the pin is current
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, Classification::UpToDate { .. })
    }

    /// Returns true if no verdict could be reached
    pub fn is_unresolvable(&self) -> bool {
        matches!(self, Classification::Unresolvable { .. })
    }

    /// The highest discovered version, if resolution got that far
    pub fn latest(&self) -> Option<&SemanticVersion> {
        match self {
            Classification::UpToDate { latest } | Classification::Outdated { latest } => {
                Some(latest)
            }
            Classification::Unresolvable { .. } => None,
        }
    }

    /// Short status label
    pub fn label(&self) -> &'static str {
        match self {
            Classification::UpToDate { .. } => "Up-to-date",
            Classification::Outdated { .. } => "Outdated",
            Classification::Unresolvable { .. } => "Unresolvable",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::UpToDate { .. } => write!(f, "up to date"),
            Classification::Outdated { latest } => write!(f, "outdated (latest {})", latest),
            Classification::Unresolvable { reason } => write!(f, "unresolvable: {}", reason),
        }
    }
}
