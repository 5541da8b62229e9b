use super::punch_kind::PunchKind;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;

/// Resolution state of a correction request.
/// Transitions exactly once: Pending → Approved or Pending → Denied.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Approved,
    Denied,
}

impl RequestStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Denied => "Denied",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(RequestStatus::Pending),
            "Approved" => Some(RequestStatus::Approved),
            "Denied" => Some(RequestStatus::Denied),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }
}

/// An employee's claim that a punch occurred but was not recorded.
/// Approval materializes the punch and consumes the request row.
#[derive(Debug, Clone, Serialize)]
pub struct EditRequest {
    pub id: i64,
    pub employee_id: i64,
    pub kind: PunchKind,
    pub timestamp: NaiveDateTime, // the claimed punch time
    pub comment: String,          // mandatory justification
    pub status: RequestStatus,
    pub created_at: String,
}

impl EditRequest {
    pub fn new(employee_id: i64, kind: PunchKind, timestamp: NaiveDateTime, comment: &str) -> Self {
        Self {
            id: 0,
            employee_id,
            kind,
            timestamp,
            comment: comment.to_string(),
            status: RequestStatus::Pending,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn timestamp_str(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
