//! Text output formatter for human-readable display
//!
//! Renders an aligned `MODULE | VERSION | NEW VERSION | STATUS` table followed
//! by the overall verdict. Widths are measured on plain text so colors never
//! break alignment.

use crate::domain::{Classification, Report, ReportRow};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

const HEADERS: [&str; 4] = ["MODULE", "VERSION", "NEW VERSION", "STATUS"];

/// Placeholder for cells without a value
const EMPTY_CELL: &str = "-";

/// Verdict when at least one module is outdated
pub const OUTDATED_MESSAGE: &str = "There are outdated modules.";

/// Verdict when nothing is outdated
pub const UP_TO_DATE_MESSAGE: &str = "All modules are up-to-date.";

/// Text formatter for human-readable output
pub struct TextFormatter {
    verbosity: Verbosity,
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self::with_color(verbosity, true)
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn cells(&self, row: &ReportRow) -> [String; 4] {
        let module = if self.verbosity == Verbosity::Verbose && row.requirement.indirect {
            format!("{} (indirect)", row.requirement.path)
        } else {
            row.requirement.path.clone()
        };

        let new_version = match &row.classification {
            Classification::Outdated { latest } => latest.to_string(),
            _ => EMPTY_CELL.to_string(),
        };

        let status = match &row.classification {
            Classification::Unresolvable { reason } if self.verbosity == Verbosity::Verbose => {
                format!("{} ({})", row.classification.label(), reason)
            }
            other => other.label().to_string(),
        };

        [module, row.requirement.pinned_version.clone(), new_version, status]
    }

    fn paint_status(&self, status: &str, classification: &Classification) -> String {
        if !self.color {
            return status.to_string();
        }
        match classification {
            Classification::Outdated { .. } => status.red().bold().to_string(),
            Classification::UpToDate { .. } => status.green().to_string(),
            Classification::Unresolvable { .. } => status.yellow().to_string(),
        }
    }

    fn write_line(
        &self,
        writer: &mut dyn Write,
        cells: &[String; 4],
        widths: &[usize; 4],
        status: &str,
    ) -> std::io::Result<()> {
        writeln!(
            writer,
            "{:<w0$} | {:<w1$} | {:<w2$} | {}",
            cells[0],
            cells[1],
            cells[2],
            status,
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        )
    }

    fn write_table(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
        let rows: Vec<[String; 4]> = report.rows().iter().map(|r| self.cells(r)).collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for cells in &rows {
            for (width, cell) in widths.iter_mut().zip(cells.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header = HEADERS.map(str::to_string);
        let header_status = if self.color {
            HEADERS[3].bold().to_string()
        } else {
            HEADERS[3].to_string()
        };
        self.write_line(writer, &header, &widths, &header_status)?;

        for (cells, row) in rows.iter().zip(report.rows()) {
            let status = self.paint_status(&cells[3], &row.classification);
            self.write_line(writer, cells, &widths, &status)?;
        }

        Ok(())
    }

    fn write_verdict(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
        if report.has_outdated() {
            let message = if self.color {
                OUTDATED_MESSAGE.red().to_string()
            } else {
                OUTDATED_MESSAGE.to_string()
            };
            writeln!(writer, "{}", message)
        } else {
            writeln!(writer, "{}", UP_TO_DATE_MESSAGE)
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity != Verbosity::Quiet {
            if report.is_empty() {
                writeln!(writer, "No modules to check.")?;
            } else {
                self.write_table(report, writer)?;
                writeln!(writer)?;
            }

            let unresolvable = report.unresolvable_count();
            if unresolvable > 0 {
                let note = format!(
                    "{} module{} could not be resolved.",
                    unresolvable,
                    if unresolvable == 1 { "" } else { "s" }
                );
                if self.color {
                    writeln!(writer, "{}", note.yellow())?;
                } else {
                    writeln!(writer, "{}", note)?;
                }
            }

            if self.verbosity == Verbosity::Verbose {
                writeln!(
                    writer,
                    "Checked {} modules: {} outdated, {} up-to-date, {} unresolvable.",
                    report.len(),
                    report.outdated_count(),
                    report.up_to_date_count(),
                    unresolvable
                )?;
            }
        }

        self.write_verdict(report, writer)
    }
}
