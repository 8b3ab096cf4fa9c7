//! Derives the delete and insert operations that bring a register in line
//! with a scan report.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::identity::{self, IdentitySet};
use crate::model::report::{Report, ReportRecord};
use crate::model::{Grid, Identity};

const DISCOVERY_DATE_INPUT: &str = "%Y-%m-%dT%H:%M:%SZ";
const DISCOVERY_DATE_OUTPUT: &str = "%d %b %Y";

/// A report record that is new to the register, ready to become a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    /// Trimmed identity, always starting with `CVE-`.
    pub id: Identity,
    /// Severity as reported, empty when the report omits it.
    pub severity: String,
    /// `None` when the report omits the package path; the cell stays blank.
    pub package_path: Option<String>,
    /// Already formatted as `DD Mon YYYY`, or empty.
    pub discovery_date: String,
}

impl NewEntry {
    fn from_record(id: &str, record: &ReportRecord) -> Self {
        Self {
            id: id.to_string(),
            severity: record.severity.clone().unwrap_or_default(),
            package_path: record.package_path.clone(),
            discovery_date: record
                .discovery_date
                .as_deref()
                .map(format_discovery_date)
                .unwrap_or_default(),
        }
    }
}

/// Everything the mutator needs to reconcile one sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReconcilePlan {
    /// Indices of stale rows, ascending.
    pub deletions: Vec<usize>,
    /// Entries to append, in report order.
    pub insertions: Vec<NewEntry>,
}

impl ReconcilePlan {
    /// Whether applying the plan would leave the sheet unchanged.
    pub fn is_noop(&self) -> bool {
        self.deletions.is_empty() && self.insertions.is_empty()
    }
}

/// Computes the reconciliation plan for `sheet` against `report` without
/// touching the sheet.
pub fn plan<G: Grid + ?Sized>(sheet: &G, report: &Report) -> ReconcilePlan {
    let report_ids = identity::report_identities(report);
    let existing = identity::existing_identities(sheet);
    debug!(
        report_ids = report_ids.len(),
        existing_ids = existing.len(),
        "extracted identities"
    );

    let deletions = rows_to_delete(sheet, &report_ids);
    let (insertions, _) = insertion_candidates(report, existing);

    ReconcilePlan {
        deletions,
        insertions,
    }
}

/// Returns, in ascending order, the indices of rows whose identity is absent
/// from the report. Rows without an identity are never selected.
pub fn rows_to_delete<G: Grid + ?Sized>(sheet: &G, report_ids: &IdentitySet) -> Vec<usize> {
    (0..sheet.row_count())
        .filter_map(|index| {
            let row = sheet.row(index);
            if row.is_empty() {
                return None;
            }
            let id = identity::row_identity(&row)?;
            if report_ids.contains(id) {
                return None;
            }
            debug!(row = index, id, "row no longer reported");
            Some(index)
        })
        .collect()
}

/// Folds the report records, in document order, into the entries to insert.
///
/// `existing` is the accumulator: an id is accepted only if it is not yet in
/// the set, and is added as soon as it is accepted, so the first occurrence
/// of a duplicated id wins. The grown set is handed back to the caller.
pub fn insertion_candidates(
    report: &Report,
    existing: IdentitySet,
) -> (Vec<NewEntry>, IdentitySet) {
    report
        .records()
        .fold((Vec::new(), existing), |(mut entries, mut seen), record| {
            if let Some(id) = record.identity().filter(|id| identity::is_identity(id))
                && seen.insert(id.to_string())
            {
                entries.push(NewEntry::from_record(id, record));
            }
            (entries, seen)
        })
}

/// Reformats a `YYYY-MM-DDThh:mm:ssZ` timestamp as `DD Mon YYYY`.
///
/// Empty or unparsable input yields an empty string.
pub fn format_discovery_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match NaiveDateTime::parse_from_str(raw, DISCOVERY_DATE_INPUT) {
        Ok(timestamp) => timestamp.format(DISCOVERY_DATE_OUTPUT).to_string(),
        Err(err) => {
            debug!(raw, %err, "discarding unparsable discovery date");
            String::new()
        }
    }
}
