use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A vulnerability scan report reduced to what reconciliation needs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    pub results: Vec<ScanResult>,
}

impl Report {
    /// Iterates every record in document order: results first, then the
    /// vulnerabilities of each result.
    pub fn records(&self) -> impl Iterator<Item = &ReportRecord> {
        self.results
            .iter()
            .flat_map(|result| result.vulnerabilities.iter())
    }
}

/// One element of the report's `results` array.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanResult {
    pub vulnerabilities: Vec<ReportRecord>,
}

/// One element of a result's `vulnerabilities` array.
///
/// Absent fields stay `None` so they remain distinguishable from empty
/// strings.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub package_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub discovery_date: Option<String>,
}

impl ReportRecord {
    /// The record identity, trimmed. Empty ids count as missing.
    pub fn identity(&self) -> Option<&str> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Scanners are not consistent about scalar types, so numbers and booleans
/// are accepted as text. `null`, objects and arrays count as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}
