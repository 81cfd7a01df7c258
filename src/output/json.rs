//! JSON output formatter for machine processing
//!
//! ```json
//! {
//!   "has_outdated": true,
//!   "summary": { "total": 2, "outdated": 1, "up_to_date": 1, "unresolvable": 0 },
//!   "modules": [
//!     { "path": "example.org/lib", "version": "v1.0.0", "latest": "v1.1.0", "status": "outdated" }
//!   ]
//! }
//! ```

use crate::domain::{Classification, Report, ReportRow};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Quiet output omits the module list
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    has_outdated: bool,
    summary: JsonSummary,
    /// Omitted in quiet mode
    #[serde(skip_serializing_if = "Option::is_none")]
    modules: Option<Vec<JsonModule<'a>>>,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    outdated: usize,
    up_to_date: usize,
    unresolvable: usize,
}

#[derive(Serialize)]
struct JsonModule<'a> {
    path: &'a str,
    version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest: Option<String>,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<JsonReason>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    indirect: bool,
}

#[derive(Serialize)]
struct JsonReason {
    code: &'static str,
    message: String,
}

impl<'a> From<&'a ReportRow> for JsonModule<'a> {
    fn from(row: &'a ReportRow) -> Self {
        let (status, reason) = match &row.classification {
            Classification::UpToDate { .. } => ("up_to_date", None),
            Classification::Outdated { .. } => ("outdated", None),
            Classification::Unresolvable { reason } => (
                "unresolvable",
                Some(JsonReason {
                    code: reason.code(),
                    message: reason.to_string(),
                }),
            ),
        };

        Self {
            path: &row.requirement.path,
            version: &row.requirement.pinned_version,
            latest: row.classification.latest().map(ToString::to_string),
            status,
            reason,
            indirect: row.requirement.indirect,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
        let modules = (self.verbosity != Verbosity::Quiet)
            .then(|| report.rows().iter().map(JsonModule::from).collect());

        let output = JsonOutput {
            has_outdated: report.has_outdated(),
            summary: JsonSummary {
                total: report.len(),
                outdated: report.outdated_count(),
                up_to_date: report.up_to_date_count(),
                unresolvable: report.unresolvable_count(),
            },
            modules,
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::{mixed_report, render};
    use serde_json::Value;

    fn parse(verbosity: Verbosity) -> Value {
        let output = render(&JsonFormatter::new(verbosity), &mixed_report());
        serde_json::from_str(&output).unwrap()
    }

    #[test]
    fn test_summary() {
        let json = parse(Verbosity::Normal);
        assert_eq!(json["has_outdated"], true);
        assert_eq!(json["summary"]["total"], 3);
        assert_eq!(json["summary"]["outdated"], 1);
        assert_eq!(json["summary"]["up_to_date"], 1);
        assert_eq!(json["summary"]["unresolvable"], 1);
    }

    #[test]
    fn test_modules_in_report_order() {
        let json = parse(Verbosity::Normal);
        let modules = json["modules"].as_array().unwrap();
        assert_eq!(modules.len(), 3);

        assert_eq!(modules[0]["path"], "example.org/old");
        assert_eq!(modules[0]["version"], "v1.0.0");
        assert_eq!(modules[0]["latest"], "v1.1.0");
        assert_eq!(modules[0]["status"], "outdated");
        assert!(modules[0].get("indirect").is_none());

        assert_eq!(modules[1]["status"], "up_to_date");
        assert_eq!(modules[1]["indirect"], true);

        assert_eq!(modules[2]["status"], "unresolvable");
        assert!(modules[2].get("latest").is_none());
        assert_eq!(modules[2]["reason"]["code"], "invalid_pinned_version");
    }

    #[test]
    fn test_quiet_omits_modules() {
        let json = parse(Verbosity::Quiet);
        assert!(json.get("modules").is_none());
        assert_eq!(json["has_outdated"], true);
    }

    #[test]
    fn test_empty_report() {
        let output = render(&JsonFormatter::new(Verbosity::Normal), &Report::default());
        let json: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["has_outdated"], false);
        assert_eq!(json["summary"]["total"], 0);
        assert_eq!(json["modules"], Value::Array(Vec::new()));
    }

    #[test]
    fn test_quiet_empty_report_omits_modules() {
        let output = render(&JsonFormatter::new(Verbosity::Quiet), &Report::default());
        let json: Value = serde_json::from_str(&output).unwrap();
        assert!(json.get("modules").is_none());
    }
}
