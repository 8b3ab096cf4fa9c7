//! Applies a [`ReconcilePlan`] to a sheet.

use tracing::{debug, warn};

use crate::identity;
use crate::model::{Cell, CellValue, Grid, Highlight, Identity};
use crate::reconcile::{NewEntry, ReconcilePlan};

/// Column receiving the identity of an inserted entry.
pub const IDENTITY_COLUMN: usize = 2;
/// Column receiving the severity of an inserted entry.
pub const SEVERITY_COLUMN: usize = 3;
/// Column receiving the package path of an inserted entry.
pub const PACKAGE_PATH_COLUMN: usize = 4;
/// Column receiving the formatted discovery date of an inserted entry.
pub const DISCOVERY_DATE_COLUMN: usize = 8;

/// Outcome of applying a plan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Applied {
    /// Identities of the removed rows, in original row order.
    pub removed: Vec<Identity>,
    /// Identities of the appended rows, in insertion order.
    pub added: Vec<Identity>,
}

/// Removes the stale rows, then appends the new entries.
///
/// Deletions run from the highest index down so pending indices stay valid;
/// each removal closes its gap. Insertions are appended after the last row,
/// with only the identity cell filled in `highlight`.
pub fn apply_plan<G: Grid + ?Sized>(
    sheet: &mut G,
    plan: &ReconcilePlan,
    highlight: Highlight,
) -> Applied {
    let mut applied = Applied::default();

    let mut deletions = plan.deletions.clone();
    deletions.sort_unstable();
    deletions.dedup();
    for &index in deletions.iter().rev() {
        let removed_id = identity::row_identity(&sheet.row(index)).map(str::to_string);
        if !sheet.remove_row(index) {
            warn!(row = index, "planned deletion is past the last row");
            continue;
        }
        applied.removed.extend(removed_id);
    }
    applied.removed.reverse();

    for entry in &plan.insertions {
        let index = sheet.row_count();
        write_entry(sheet, index, entry, highlight);
        debug!(row = index, id = %entry.id, "appended new entry");
        applied.added.push(entry.id.clone());
    }

    applied
}

fn write_entry<G: Grid + ?Sized>(sheet: &mut G, row: usize, entry: &NewEntry, highlight: Highlight) {
    sheet.set_cell(
        row,
        IDENTITY_COLUMN,
        Cell::string(entry.id.as_str()).highlighted(highlight),
    );
    sheet.set_cell(row, SEVERITY_COLUMN, Cell::string(entry.severity.as_str()));
    let package_path = match &entry.package_path {
        Some(path) => CellValue::String(path.clone()),
        None => CellValue::Empty,
    };
    sheet.set_cell(row, PACKAGE_PATH_COLUMN, Cell::new(package_path));
    sheet.set_cell(
        row,
        DISCOVERY_DATE_COLUMN,
        Cell::string(entry.discovery_date.as_str()),
    );
}
