//! Diagnostics formatter for lint hosts
//!
//! Emits one line per module that needs attention. Up-to-date modules produce
//! no output, so an empty result means a clean run. Outdated modules are
//! `error:` lines and modules that could not be checked are `warning:` lines.

use crate::domain::{Classification, Report, ReportRow, UnresolvableReason};
use crate::output::OutputFormatter;
use std::io::Write;

/// Diagnostics formatter
#[derive(Debug, Default)]
pub struct DiagnosticsFormatter;

impl DiagnosticsFormatter {
    /// Create a new diagnostics formatter
    pub fn new() -> Self {
        Self
    }

    fn diagnostic(row: &ReportRow) -> Option<String> {
        let path = &row.requirement.path;
        let pinned = &row.requirement.pinned_version;

        match &row.classification {
            Classification::UpToDate { .. } => None,
            Classification::Outdated { latest } => Some(format!(
                "error: module '{}' is outdated ({}), latest version: {}",
                path, pinned, latest
            )),
            Classification::Unresolvable { reason } => Some(match reason {
                UnresolvableReason::FetchFailed(message) => {
                    format!("warning: could not check versions of module '{}': {}", path, message)
                }
                UnresolvableReason::InvalidPinnedVersion(raw) => {
                    format!("warning: module '{}' has an invalid version: {}", path, raw)
                }
                UnresolvableReason::NoValidVersionsFound => {
                    format!("warning: no valid versions found for module '{}'", path)
                }
                UnresolvableReason::NoStableVersionsFound => format!(
                    "warning: no stable versions found for module '{}' (only pre-releases)",
                    path
                ),
            }),
        }
    }
}

impl OutputFormatter for DiagnosticsFormatter {
    fn format(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
        for line in report.rows().iter().filter_map(Self::diagnostic) {
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }
}
