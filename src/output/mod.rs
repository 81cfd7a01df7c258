//! Output formatting for freshness reports
//!
//! This module provides:
//! - Text output: aligned module table plus a verdict line
//! - JSON output for machine processing
//! - Diagnostics output: one line per module that needs attention

mod diagnostics;
mod json;
mod text;

pub use diagnostics::DiagnosticsFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::Report;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
    /// `warning:` / `error:` lines for lint hosts
    Diagnostics,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Verdict only
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Adds reasons and a summary line
    Verbose,
}

impl Verbosity {
    /// Verbosity from the CLI flags; quiet wins
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json, diagnostics)
    pub format: OutputFormat,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Whether to use colors (when supported)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create a new output configuration
    pub fn new(format: OutputFormat, verbosity: Verbosity, color: bool) -> Self {
        Self {
            format,
            verbosity,
            color,
        }
    }

    /// Whether a progress bar fits alongside this output
    pub fn shows_progress(&self) -> bool {
        self.format == OutputFormat::Text && self.verbosity != Verbosity::Quiet
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write a report
    fn format(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.verbosity, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.verbosity)),
        OutputFormat::Diagnostics => Box::new(DiagnosticsFormatter::new()),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::{normalize, Classification, Report, Requirement, UnresolvableReason};

    /// Report with one row of each classification
    pub fn mixed_report() -> Report {
        Report::build(vec![
            (
                Requirement::new("example.org/old", "v1.0.0"),
                Classification::Outdated {
                    latest: normalize("v1.1.0").unwrap(),
                },
            ),
            (
                Requirement::new("example.org/fresh", "v2.0.0").with_indirect(true),
                Classification::UpToDate {
                    latest: normalize("v2.0.0").unwrap(),
                },
            ),
            (
                Requirement::new("example.org/broken", "not-a-version"),
                Classification::unresolvable(UnresolvableReason::InvalidPinnedVersion(
                    "not-a-version".to_string(),
                )),
            ),
        ])
    }

    /// Report where every module is current
    pub fn clean_report() -> Report {
        Report::build(vec![(
            Requirement::new("example.org/fresh", "v2.0.0"),
            Classification::UpToDate {
                latest: normalize("v2.0.0").unwrap(),
            },
        )])
    }

    /// Render a report with the given formatter
    pub fn render(formatter: &dyn super::OutputFormatter, report: &Report) -> String {
        let mut buf = Vec::new();
        formatter.format(report, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }
}
