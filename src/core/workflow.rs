//! Correction workflow: the pure state-machine half.
//!
//! Requests move Pending → Approved or Pending → Denied/Rejected exactly
//! once. These guards validate snapshots handed in by the caller; the
//! storage layer (`db::queries`) re-enforces the same transitions with
//! conditional writes so that concurrent resolutions cannot both win.

use crate::errors::{AppError, AppResult};
use crate::models::edit_request::EditRequest;
use crate::models::password_request::PasswordResetRequest;
use crate::models::punch::Punch;
use crate::models::punch_kind::PunchKind;
use crate::utils::time::parse_timestamp;
use chrono::NaiveDateTime;

/// Validate the fields of a missing-punch claim before it is stored.
/// The comment is the mandatory justification; the timestamp is the
/// claimed punch time.
pub fn validate_edit_submission(
    kind_raw: &str,
    timestamp_raw: &str,
    comment: &str,
) -> AppResult<(PunchKind, NaiveDateTime, String)> {
    let kind = PunchKind::parse_cli(kind_raw)
        .ok_or_else(|| AppError::InvalidPunchKind(kind_raw.to_string()))?;

    let timestamp = parse_timestamp(timestamp_raw)
        .map_err(|_| AppError::Validation(format!("unparseable timestamp '{timestamp_raw}'")))?;

    let comment = comment.trim();
    if comment.is_empty() {
        return Err(AppError::Validation("a reason/comment is required".into()));
    }

    Ok((kind, timestamp, comment.to_string()))
}

/// Reject resolution of a correction request that already left Pending.
pub fn ensure_pending_edit(request: &EditRequest) -> AppResult<()> {
    if request.status.is_pending() {
        Ok(())
    } else {
        Err(AppError::AlreadyResolved(format!(
            "edit request #{} is {}",
            request.id,
            request.status.to_db_str()
        )))
    }
}

/// Reject resolution of a password reset request that already left Pending.
pub fn ensure_pending_reset(request: &PasswordResetRequest) -> AppResult<()> {
    if request.status.is_pending() {
        Ok(())
    } else {
        Err(AppError::AlreadyResolved(format!(
            "password request #{} is {}",
            request.id,
            request.status.to_db_str()
        )))
    }
}

/// Build the authoritative punch an approved claim turns into.
/// Kind, timestamp and subject come from the request verbatim.
pub fn materialize(request: &EditRequest) -> Punch {
    let mut punch = Punch::new(request.employee_id, request.kind, request.timestamp);
    punch.source = "approved-request".to_string();
    punch
}

/// A temporary password must carry actual content.
pub fn validate_temp_secret(secret: &str) -> AppResult<()> {
    if secret.trim().is_empty() {
        Err(AppError::Validation("temporary password must not be empty".into()))
    } else {
        Ok(())
    }
}
