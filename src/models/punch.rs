use super::punch_kind::PunchKind;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// A single immutable clock event for one employee.
///
/// Punches for a subject are totally ordered by `(timestamp, id)`;
/// `id` carries the insertion-order tiebreak for equal timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct Punch {
    pub id: i64,
    pub employee_id: i64,       // ⇔ punches.employee_id (rowid of employees)
    pub kind: PunchKind,        // ⇔ punches.kind ('IN'|'OUT'|'BREAK_IN'|'BREAK_OUT')
    pub timestamp: NaiveDateTime, // ⇔ punches.timestamp (TEXT "YYYY-MM-DD HH:MM:SS")
    pub source: String,         // ⇔ punches.source ('cli' | 'approved-request')
    pub created_at: String,     // ⇔ punches.created_at (TEXT, ISO8601)
}

impl Punch {
    /// High-level constructor for punches recorded at the terminal.
    /// - `id = 0` until the row is inserted
    /// - `source = "cli"`
    /// - `created_at = now() in ISO8601`
    pub fn new(employee_id: i64, kind: PunchKind, timestamp: NaiveDateTime) -> Self {
        Self {
            id: 0,
            employee_id,
            kind,
            timestamp,
            source: "cli".to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }

    pub fn timestamp_str(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    pub fn time_str(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}
