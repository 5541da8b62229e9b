use crate::models::punch::Punch;
use serde::Serialize;

/// Flattened punch row for CSV/JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct PunchExport {
    pub employee: String,
    pub kind: String,
    pub timestamp: String,
    pub source: String,
}

impl PunchExport {
    pub fn from_punch(employee_code: &str, punch: &Punch) -> Self {
        Self {
            employee: employee_code.to_string(),
            kind: punch.kind.to_db_str().to_string(),
            timestamp: punch.timestamp_str(),
            source: punch.source.clone(),
        }
    }
}
