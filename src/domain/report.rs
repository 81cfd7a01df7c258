//! Ordered resolver report and aggregate verdict

use super::{Classification, Requirement};

/// One requirement and its verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// The declared requirement
    pub requirement: Requirement,
    /// Its classification
    pub classification: Classification,
}

/// Result of one resolver run
///
/// Rows keep the order they were supplied in, which is the RequirementSet
/// order. They are never regrouped by status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    rows: Vec<ReportRow>,
    has_outdated: bool,
}

impl Report {
    /// Build a report from classified requirements in source order
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (Requirement, Classification)>,
    {
        let rows: Vec<ReportRow> = rows
            .into_iter()
            .map(|(requirement, classification)| ReportRow {
                requirement,
                classification,
            })
            .collect();
        let has_outdated = rows.iter().any(|r| r.classification.is_outdated());

        Self { rows, has_outdated }
    }

    /// All rows in source order
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// True iff at least one row is outdated
    pub fn has_outdated(&self) -> bool {
        self.has_outdated
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the report has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of outdated rows
    pub fn outdated_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.classification.is_outdated())
            .count()
    }

    /// Number of up-to-date rows
    pub fn up_to_date_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.classification.is_up_to_date())
            .count()
    }

    /// Number of unresolvable rows
    pub fn unresolvable_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.classification.is_unresolvable())
            .count()
    }

    /// Rows that could not be classified
    pub fn unresolvable(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows
            .iter()
            .filter(|r| r.classification.is_unresolvable())
    }
}
