use chrono::Local;
use serde::Serialize;

/// Resolution state of a password reset request.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ResetStatus {
    Pending,
    Approved,
    Rejected,
}

impl ResetStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ResetStatus::Pending => "Pending",
            ResetStatus::Approved => "Approved",
            ResetStatus::Rejected => "Rejected",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(ResetStatus::Pending),
            "Approved" => Some(ResetStatus::Approved),
            "Rejected" => Some(ResetStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ResetStatus::Pending)
    }
}

/// A self-service password reset request, resolved once by an admin.
/// Invariant: `temp_password` is set if and only if status is Approved.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetRequest {
    pub id: i64,
    pub employee_id: i64,
    pub email: String, // contact email for the issued secret
    pub reason: String,
    pub status: ResetStatus,
    pub temp_password: Option<String>,
    pub resolved_by: Option<String>,
    pub resolved_at: Option<String>,
    pub created_at: String,
}

impl PasswordResetRequest {
    pub fn new(employee_id: i64, email: &str, reason: &str) -> Self {
        Self {
            id: 0,
            employee_id,
            email: email.to_string(),
            reason: reason.to_string(),
            status: ResetStatus::Pending,
            temp_password: None,
            resolved_by: None,
            resolved_at: None,
            created_at: Local::now().to_rfc3339(),
        }
    }
}
