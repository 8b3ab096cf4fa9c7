use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::{Result, ToolError};
use crate::io::{report, xlsx};
use crate::model::report::Report;
use crate::model::{Grid, Highlight, Identity};
use crate::mutate::{self, Applied};
use crate::reconcile;

/// File name the reconciled register is written to by default.
pub const DEFAULT_OUTPUT: &str = "output.xlsx";

/// Knobs for a reconciliation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOptions {
    /// Destination of the reconciled workbook.
    pub output: PathBuf,
    /// Register sheet name; the first sheet when `None`.
    pub sheet: Option<String>,
    /// Fill color of inserted identity cells.
    pub highlight: Highlight,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            sheet: None,
            highlight: Highlight::default(),
        }
    }
}

/// What a run changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncSummary {
    /// Name of the reconciled sheet.
    pub sheet: String,
    /// Where the reconciled workbook was written.
    pub output: PathBuf,
    /// Identities of the rows removed as stale, in register order.
    pub removed: Vec<Identity>,
    /// Identities appended as new entries, in report order.
    pub added: Vec<Identity>,
}

/// Reconciles one sheet in memory: plans against the report, then applies.
pub fn reconcile_sheet<G: Grid + ?Sized>(
    sheet: &mut G,
    report: &Report,
    highlight: Highlight,
) -> Applied {
    let plan = reconcile::plan(sheet, report);
    debug!(
        deletions = plan.deletions.len(),
        insertions = plan.insertions.len(),
        "reconciliation planned"
    );
    mutate::apply_plan(sheet, &plan, highlight)
}

/// Reconciles the register workbook at `register` against the scan report at
/// `report_path` and writes the result to `options.output`.
///
/// Both inputs are fully loaded and validated before anything is mutated; the
/// output is written once, after all mutation succeeded. The register file
/// itself is never modified.
#[instrument(
    level = "info",
    skip_all,
    fields(register = %register.display(), report = %report_path.display())
)]
pub fn sync_register(
    register: &Path,
    report_path: &Path,
    options: &SyncOptions,
) -> Result<SyncSummary> {
    for input in [register, report_path] {
        if !input.exists() {
            return Err(ToolError::MissingInput(input.to_path_buf()));
        }
    }

    let mut book = xlsx::read_workbook(register)?;
    info!(sheet_count = book.get_sheet_count(), "read register workbook");

    let scan = report::read_report(report_path)?;
    info!(result_count = scan.results.len(), "parsed scan report");

    let mut sheet = xlsx::register_sheet(&mut book, options.sheet.as_deref())?;
    let applied = reconcile_sheet(&mut sheet, &scan, options.highlight);
    let sheet_name = sheet.name().to_string();
    info!(
        sheet = %sheet_name,
        removed = applied.removed.len(),
        added = applied.added.len(),
        "register reconciled"
    );

    xlsx::write_workbook(&options.output, &book)?;
    info!(output = %options.output.display(), "wrote reconciled register");

    Ok(SyncSummary {
        sheet: sheet_name,
        output: options.output.clone(),
        removed: applied.removed,
        added: applied.added,
    })
}
