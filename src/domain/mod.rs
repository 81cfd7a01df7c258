//! Core domain models for outdatedcheck
//!
//! This module contains the fundamental types used throughout the application:
//! - Semantic version normalization and precedence ordering
//! - Declared module requirements
//! - Per-requirement classifications
//! - The ordered report and its aggregate verdict

mod classification;
mod report;
mod requirement;
mod version;

pub use classification::{Classification, UnresolvableReason};
pub use report::{Report, ReportRow};
pub use requirement::Requirement;
pub use version::{normalize, SemanticVersion};
