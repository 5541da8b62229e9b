use crate::core::workflow;
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::edit_request::{EditRequest, RequestStatus};
use crate::models::employee::Employee;
use crate::models::password_request::{PasswordResetRequest, ResetStatus};
use crate::models::punch::Punch;
use crate::models::punch_kind::PunchKind;
use chrono::{Local, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Row, params};

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn ts_to_db(ts: NaiveDateTime) -> String {
    ts.format(TS_FORMAT).to_string()
}

fn ts_from_db(raw: &str) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TS_FORMAT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTimestamp(raw.to_string())),
        )
    })
}

fn kind_from_db(raw: &str) -> rusqlite::Result<PunchKind> {
    PunchKind::from_db_str(raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidPunchKind(raw.to_string())),
        )
    })
}

// ---------------------------------------------------------------------------
// Punches
// ---------------------------------------------------------------------------

pub fn map_punch_row(row: &Row) -> rusqlite::Result<Punch> {
    let kind_str: String = row.get("kind")?;
    let ts_str: String = row.get("timestamp")?;

    Ok(Punch {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        kind: kind_from_db(&kind_str)?,
        timestamp: ts_from_db(&ts_str)?,
        source: row.get("source")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_punch(conn: &Connection, punch: &Punch) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO punches (employee_id, kind, timestamp, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            punch.employee_id,
            punch.kind.to_db_str(),
            ts_to_db(punch.timestamp),
            punch.source,
            punch.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Load punches ordered by `(timestamp, id)` ascending — the total order
/// the reconciler requires (id breaks timestamp ties by insertion order).
pub fn load_punches(conn: &Connection, employee_id: Option<i64>) -> AppResult<Vec<Punch>> {
    let mut out = Vec::new();

    match employee_id {
        Some(eid) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM punches WHERE employee_id = ?1 ORDER BY timestamp ASC, id ASC",
            )?;
            let rows = stmt.query_map([eid], map_punch_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt =
                conn.prepare("SELECT * FROM punches ORDER BY timestamp ASC, id ASC")?;
            let rows = stmt.query_map([], map_punch_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

pub fn last_punch(conn: &Connection, employee_id: i64) -> AppResult<Option<Punch>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM punches WHERE employee_id = ?1
         ORDER BY timestamp DESC, id DESC LIMIT 1",
    )?;
    let punch = stmt.query_row([employee_id], map_punch_row).optional()?;
    Ok(punch)
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

pub fn map_employee_row(row: &Row) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        code: row.get("code")?,
        name: row.get("name")?,
        email: row.get("email")?,
        password: row.get("password")?,
        is_admin: row.get::<_, i32>("is_admin")? != 0,
        password_last_changed: row.get("password_last_changed")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_employee(conn: &Connection, emp: &Employee) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO employees (code, name, email, password, is_admin, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            emp.code,
            emp.name,
            emp.email,
            emp.password,
            if emp.is_admin { 1 } else { 0 },
            emp.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_employee_by_code(conn: &Connection, code: &str) -> AppResult<Option<Employee>> {
    let mut stmt = conn.prepare("SELECT * FROM employees WHERE code = ?1")?;
    let emp = stmt.query_row([code], map_employee_row).optional()?;
    Ok(emp)
}

pub fn load_employees(conn: &Connection) -> AppResult<Vec<Employee>> {
    let mut stmt = conn.prepare("SELECT * FROM employees ORDER BY name ASC")?;
    let rows = stmt.query_map([], map_employee_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Remove an employee together with their punches and open requests.
pub fn delete_employee(conn: &mut Connection, code: &str) -> AppResult<bool> {
    let Some(emp) = find_employee_by_code(conn, code)? else {
        return Ok(false);
    };

    let tx = conn.transaction()?;
    tx.execute("DELETE FROM punches WHERE employee_id = ?1", [emp.id])?;
    tx.execute("DELETE FROM edit_requests WHERE employee_id = ?1", [emp.id])?;
    tx.execute("DELETE FROM password_requests WHERE employee_id = ?1", [emp.id])?;
    tx.execute("DELETE FROM employees WHERE id = ?1", [emp.id])?;
    audit(&tx, "employee.remove", &emp.code, &format!("removed {}", emp.name))?;
    tx.commit()?;

    Ok(true)
}

pub fn update_employee_password(
    conn: &Connection,
    employee_id: i64,
    new_password: &str,
) -> AppResult<()> {
    let now = Local::now().to_rfc3339();
    let touched = conn.execute(
        "UPDATE employees SET password = ?1, password_last_changed = ?2 WHERE id = ?3",
        params![new_password, now, employee_id],
    )?;
    if touched == 0 {
        return Err(AppError::NotFound(format!("employee #{employee_id}")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Edit requests (missing-punch claims)
// ---------------------------------------------------------------------------

pub fn map_edit_request_row(row: &Row) -> rusqlite::Result<EditRequest> {
    let kind_str: String = row.get("kind")?;
    let ts_str: String = row.get("timestamp")?;
    let status_str: String = row.get("status")?;

    let status = RequestStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("invalid request status: {status_str}"))),
        )
    })?;

    Ok(EditRequest {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        kind: kind_from_db(&kind_str)?,
        timestamp: ts_from_db(&ts_str)?,
        comment: row.get("comment")?,
        status,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_edit_request(conn: &Connection, req: &EditRequest) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO edit_requests (employee_id, kind, timestamp, comment, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            req.employee_id,
            req.kind.to_db_str(),
            ts_to_db(req.timestamp),
            req.comment,
            req.status.to_db_str(),
            req.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// The pending queue, oldest claimed punch first (the admin review order).
pub fn load_edit_requests(
    conn: &Connection,
    employee_id: Option<i64>,
) -> AppResult<Vec<EditRequest>> {
    let mut out = Vec::new();

    match employee_id {
        Some(eid) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM edit_requests WHERE employee_id = ?1
                 ORDER BY timestamp ASC, id ASC",
            )?;
            let rows = stmt.query_map([eid], map_edit_request_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt =
                conn.prepare("SELECT * FROM edit_requests ORDER BY timestamp ASC, id ASC")?;
            let rows = stmt.query_map([], map_edit_request_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

pub fn get_edit_request(conn: &Connection, id: i64) -> AppResult<Option<EditRequest>> {
    let mut stmt = conn.prepare("SELECT * FROM edit_requests WHERE id = ?1")?;
    let req = stmt.query_row([id], map_edit_request_row).optional()?;
    Ok(req)
}

/// Approve a claim: materialize the punch and consume the request row,
/// atomically. The conditional delete (`status = 'Pending'`) makes
/// concurrent resolutions lose with `AlreadyResolved` instead of
/// double-materializing the punch.
pub fn approve_edit_request(conn: &mut Connection, req: &EditRequest) -> AppResult<Punch> {
    workflow::ensure_pending_edit(req)?;
    let mut punch = workflow::materialize(req);

    let tx = conn.transaction()?;

    let removed = tx.execute(
        "DELETE FROM edit_requests WHERE id = ?1 AND status = 'Pending'",
        [req.id],
    )?;
    if removed == 0 {
        return Err(AppError::AlreadyResolved(format!("edit request #{}", req.id)));
    }

    tx.execute(
        "INSERT INTO punches (employee_id, kind, timestamp, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            punch.employee_id,
            punch.kind.to_db_str(),
            ts_to_db(punch.timestamp),
            punch.source,
            punch.created_at,
        ],
    )?;
    punch.id = tx.last_insert_rowid();

    audit(
        &tx,
        "request.approve",
        &format!("edit_request:{}", req.id),
        &format!(
            "materialized {} punch at {} for employee #{}",
            punch.kind.to_db_str(),
            punch.timestamp_str(),
            punch.employee_id
        ),
    )?;

    tx.commit()?;
    Ok(punch)
}

/// Deny a claim: the request row is discarded, nothing is materialized.
pub fn deny_edit_request(conn: &mut Connection, req: &EditRequest) -> AppResult<()> {
    workflow::ensure_pending_edit(req)?;

    let tx = conn.transaction()?;

    let removed = tx.execute(
        "DELETE FROM edit_requests WHERE id = ?1 AND status = 'Pending'",
        [req.id],
    )?;
    if removed == 0 {
        return Err(AppError::AlreadyResolved(format!("edit request #{}", req.id)));
    }

    audit(
        &tx,
        "request.deny",
        &format!("edit_request:{}", req.id),
        &format!("denied claim for employee #{}", req.employee_id),
    )?;

    tx.commit()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Password reset requests
// ---------------------------------------------------------------------------

pub fn map_password_request_row(row: &Row) -> rusqlite::Result<PasswordResetRequest> {
    let status_str: String = row.get("status")?;
    let status = ResetStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("invalid reset status: {status_str}"))),
        )
    })?;

    Ok(PasswordResetRequest {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        email: row.get("email")?,
        reason: row.get("reason")?,
        status,
        temp_password: row.get("temp_password")?,
        resolved_by: row.get("resolved_by")?,
        resolved_at: row.get("resolved_at")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_password_request(conn: &Connection, req: &PasswordResetRequest) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO password_requests (employee_id, email, reason, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            req.employee_id,
            req.email,
            req.reason,
            req.status.to_db_str(),
            req.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Newest first, matching the admin review screen.
pub fn load_password_requests(conn: &Connection) -> AppResult<Vec<PasswordResetRequest>> {
    let mut stmt =
        conn.prepare("SELECT * FROM password_requests ORDER BY created_at DESC, id DESC")?;
    let rows = stmt.query_map([], map_password_request_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_password_request(conn: &Connection, id: i64) -> AppResult<Option<PasswordResetRequest>> {
    let mut stmt = conn.prepare("SELECT * FROM password_requests WHERE id = ?1")?;
    let req = stmt.query_row([id], map_password_request_row).optional()?;
    Ok(req)
}

/// Approve a reset: issue the temporary secret on the request AND set it
/// as the employee's password, in one transaction so the two writes cannot
/// diverge. Under concurrent approval at most one caller's conditional
/// update wins; the loser sees `AlreadyResolved`.
pub fn approve_password_reset(
    conn: &mut Connection,
    req: &PasswordResetRequest,
    temp_secret: &str,
    resolved_by: &str,
) -> AppResult<()> {
    workflow::validate_temp_secret(temp_secret)?;
    workflow::ensure_pending_reset(req)?;

    let now = Local::now().to_rfc3339();
    let tx = conn.transaction()?;

    let updated = tx.execute(
        "UPDATE password_requests
         SET status = 'Approved', temp_password = ?1, resolved_by = ?2, resolved_at = ?3
         WHERE id = ?4 AND status = 'Pending'",
        params![temp_secret, resolved_by, now, req.id],
    )?;
    if updated == 0 {
        return Err(AppError::AlreadyResolved(format!("password request #{}", req.id)));
    }

    let touched = tx.execute(
        "UPDATE employees SET password = ?1, password_last_changed = ?2 WHERE id = ?3",
        params![temp_secret, now, req.employee_id],
    )?;
    if touched == 0 {
        // rollback on drop: neither write survives
        return Err(AppError::NotFound(format!("employee #{}", req.employee_id)));
    }

    audit(
        &tx,
        "passwd.approve",
        &format!("password_request:{}", req.id),
        &format!("temporary password issued by {resolved_by}"),
    )?;

    tx.commit()?;
    Ok(())
}

/// Reject a reset: status flips once, no secret is issued.
pub fn reject_password_reset(
    conn: &mut Connection,
    req: &PasswordResetRequest,
    resolved_by: &str,
) -> AppResult<()> {
    workflow::ensure_pending_reset(req)?;

    let now = Local::now().to_rfc3339();
    let tx = conn.transaction()?;

    let updated = tx.execute(
        "UPDATE password_requests
         SET status = 'Rejected', resolved_by = ?1, resolved_at = ?2
         WHERE id = ?3 AND status = 'Pending'",
        params![resolved_by, now, req.id],
    )?;
    if updated == 0 {
        return Err(AppError::AlreadyResolved(format!("password request #{}", req.id)));
    }

    audit(
        &tx,
        "passwd.reject",
        &format!("password_request:{}", req.id),
        &format!("rejected by {resolved_by}"),
    )?;

    tx.commit()?;
    Ok(())
}
