//! Schema migrations, tracked through `PRAGMA user_version`.

use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

const SCHEMA_VERSION: i32 = 1;

pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    let current: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current >= SCHEMA_VERSION {
        return Ok(());
    }

    if current < 1 {
        migrate_to_v1(conn)?;
    }

    conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))
        .map_err(|e| AppError::Migration(e.to_string()))?;

    Ok(())
}

/// v1: the full attendance schema.
fn migrate_to_v1(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id                    INTEGER PRIMARY KEY AUTOINCREMENT,
            code                  TEXT NOT NULL UNIQUE,
            name                  TEXT NOT NULL,
            email                 TEXT,
            password              TEXT NOT NULL DEFAULT '',
            is_admin              INTEGER NOT NULL DEFAULT 0,
            password_last_changed TEXT,
            created_at            TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS punches (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id INTEGER NOT NULL REFERENCES employees(id),
            kind        TEXT NOT NULL CHECK(kind IN ('IN','OUT','BREAK_IN','BREAK_OUT')),
            timestamp   TEXT NOT NULL,
            source      TEXT NOT NULL DEFAULT 'cli',
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_punches_employee_ts ON punches(employee_id, timestamp);
        CREATE INDEX IF NOT EXISTS idx_punches_ts ON punches(timestamp);

        CREATE TABLE IF NOT EXISTS edit_requests (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id INTEGER NOT NULL REFERENCES employees(id),
            kind        TEXT NOT NULL CHECK(kind IN ('IN','OUT','BREAK_IN','BREAK_OUT')),
            timestamp   TEXT NOT NULL,
            comment     TEXT NOT NULL,
            status      TEXT NOT NULL DEFAULT 'Pending' CHECK(status IN ('Pending','Approved','Denied')),
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS password_requests (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id   INTEGER NOT NULL REFERENCES employees(id),
            email         TEXT NOT NULL,
            reason        TEXT NOT NULL DEFAULT '',
            status        TEXT NOT NULL DEFAULT 'Pending' CHECK(status IN ('Pending','Approved','Rejected')),
            temp_password TEXT,
            resolved_by   TEXT,
            resolved_at   TEXT,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
    .map_err(|e| AppError::Migration(e.to_string()))?;

    Ok(())
}
