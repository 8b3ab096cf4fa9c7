use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Result, ToolError};
use crate::model::report::{Report, ReportRecord, ScanResult};

/// Reads and parses a JSON scan report from disk.
pub fn read_report(path: &Path) -> Result<Report> {
    let source = fs::read_to_string(path)?;
    let json: Value = serde_json::from_str(&source)?;
    parse_report(&json)
}

/// Converts a parsed JSON document into a [`Report`].
///
/// The top-level `results` member must be an array. Results without a
/// `vulnerabilities` array and vulnerabilities that are not objects are
/// skipped.
pub fn parse_report(document: &Value) -> Result<Report> {
    let results = match document.get("results") {
        Some(Value::Array(results)) => results,
        Some(other) => {
            return Err(ToolError::MalformedReport(format!(
                "expected 'results' to be an array, found {}",
                json_kind(other)
            )));
        }
        None => {
            return Err(ToolError::MalformedReport(
                "missing top-level 'results' array".into(),
            ));
        }
    };

    let results = results
        .iter()
        .map(parse_result)
        .collect::<Result<Vec<_>>>()?;
    Ok(Report { results })
}

fn parse_result(result: &Value) -> Result<ScanResult> {
    let Some(Value::Array(entries)) = result.get("vulnerabilities") else {
        return Ok(ScanResult::default());
    };

    let vulnerabilities = entries
        .iter()
        .filter(|entry| entry.is_object())
        .map(|entry| serde_json::from_value::<ReportRecord>(entry.clone()))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(ScanResult { vulnerabilities })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
