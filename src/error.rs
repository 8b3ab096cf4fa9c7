use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the failure cases of a reconciliation run: loading the
/// register or the report, and writing the reconciled register back out.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the report is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel reader and writer.
    #[error("Excel error: {0}")]
    Excel(#[from] umya_spreadsheet::XlsxError),

    /// Raised when the register workbook has no usable sheet.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when the report does not carry a top-level `results` array.
    #[error("malformed report: {0}")]
    MalformedReport(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

/// Message shown to the user when a run fails for any reason other than a
/// malformed report.
pub const GENERIC_FAILURE: &str = "An error occurred while processing the files.";

/// Message shown to the user when the report lacks a `results` array.
pub const MISSING_RESULTS: &str = "No 'results' array found in JSON.";

impl ToolError {
    /// Whether the error stems from the report's structure rather than from
    /// accessing or decoding the inputs.
    pub fn is_malformed_report(&self) -> bool {
        matches!(self, ToolError::MalformedReport(_))
    }

    /// The one-line message shown to the user. Details go to the log.
    pub fn user_message(&self) -> &'static str {
        if self.is_malformed_report() {
            MISSING_RESULTS
        } else {
            GENERIC_FAILURE
        }
    }
}
