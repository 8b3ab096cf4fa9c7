//! Identity extraction for register rows and report records.

use std::collections::HashSet;

use crate::model::report::Report;
use crate::model::{Grid, Identity, Row};

/// Prefix every vulnerability identity starts with.
pub const IDENTITY_PREFIX: &str = "CVE-";

/// Set of identities, used both for lookups and as the insertion accumulator.
pub type IdentitySet = HashSet<Identity>;

/// Whether `value` is a usable identity.
pub fn is_identity(value: &str) -> bool {
    value.starts_with(IDENTITY_PREFIX)
}

/// Returns the identity of a row: the first string cell, in column order,
/// whose trimmed value starts with [`IDENTITY_PREFIX`].
pub fn row_identity(row: &Row) -> Option<&str> {
    row.cells
        .iter()
        .filter_map(|cell| cell.value.as_str())
        .map(str::trim)
        .find(|value| is_identity(value))
}

/// Collects the identity of every row in the sheet. Rows with several
/// matching cells contribute only the first one.
pub fn existing_identities<G: Grid + ?Sized>(sheet: &G) -> IdentitySet {
    (0..sheet.row_count())
        .filter_map(|index| row_identity(&sheet.row(index)).map(str::to_string))
        .collect()
}

/// Collects every record id found in the report, whatever its prefix.
pub fn report_identities(report: &Report) -> IdentitySet {
    report
        .records()
        .filter_map(|record| record.identity())
        .map(str::to_string)
        .collect()
}
