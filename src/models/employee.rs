use chrono::Local;
use serde::Serialize;

/// An employee record of the store.
///
/// `password` is stored and compared in plaintext; hardening the
/// credential handling is an explicit non-goal of this system.
#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: i64,
    pub code: String, // human-facing employee id, unique
    pub name: String,
    pub email: Option<String>,
    pub password: String,
    pub is_admin: bool,
    pub password_last_changed: Option<String>,
    pub created_at: String,
}

impl Employee {
    pub fn new(code: &str, name: &str, email: Option<String>, password: &str, is_admin: bool) -> Self {
        Self {
            id: 0,
            code: code.to_string(),
            name: name.to_string(),
            email,
            password: password.to_string(),
            is_admin,
            password_last_changed: None,
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// Employees created without a password can act without one.
    pub fn requires_password(&self) -> bool {
        !self.password.is_empty()
    }
}
