//! Explicit session context: store-gate state plus the acting employee.
//! Passed into operations instead of living in ambient global state.

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::find_employee_by_code;
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;

#[derive(Debug, Default)]
pub struct Session {
    store_unlocked: bool,
    actor: Option<Employee>,
}

impl Session {
    /// Pass the store gate. An empty configured passphrase means the gate
    /// is open (the out-of-the-box and test configuration).
    pub fn open(cfg: &Config, store_key: Option<&str>) -> AppResult<Self> {
        if !cfg.store_passphrase.is_empty() && store_key != Some(cfg.store_passphrase.as_str()) {
            return Err(AppError::StoreGate(
                "missing or wrong --store-key for this store".into(),
            ));
        }
        Ok(Self {
            store_unlocked: true,
            actor: None,
        })
    }

    /// Authenticate an employee by code. Plaintext comparison against the
    /// stored password, exactly as strong as the system promises to be;
    /// employees without a password can act without one.
    pub fn login(
        &mut self,
        pool: &mut DbPool,
        code: &str,
        password: Option<&str>,
    ) -> AppResult<Employee> {
        let employee = find_employee_by_code(&pool.conn, code)?
            .ok_or_else(|| AppError::NotFound(format!("employee {code}")))?;

        if employee.requires_password() && password != Some(employee.password.as_str()) {
            return Err(AppError::AuthFailed(code.to_string()));
        }

        self.actor = Some(employee.clone());
        Ok(employee)
    }

    pub fn is_unlocked(&self) -> bool {
        self.store_unlocked
    }

    pub fn actor(&self) -> Option<&Employee> {
        self.actor.as_ref()
    }
}
