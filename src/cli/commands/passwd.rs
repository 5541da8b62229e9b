use crate::cli::parser::{Cli, Commands, PasswdAction};
use crate::config::Config;
use crate::core::session::Session;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{
    approve_password_reset, find_employee_by_code, get_password_request, insert_password_request,
    load_employees, load_password_requests, reject_password_reset,
};
use crate::errors::{AppError, AppResult};
use crate::models::password_request::PasswordResetRequest;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;
use std::collections::HashMap;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Passwd { action } = &cli.command else {
        return Ok(());
    };

    Session::open(cfg, cli.store_key.as_deref())?;
    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        PasswdAction::Request {
            employee,
            email,
            reason,
        } => {
            let emp = find_employee_by_code(&pool.conn, employee)?
                .ok_or_else(|| AppError::NotFound(format!("employee {employee}")))?;

            let contact = email
                .clone()
                .or_else(|| emp.email.clone())
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "employee {} has no contact email; pass --email",
                        emp.code
                    ))
                })?;

            let request = PasswordResetRequest::new(emp.id, &contact, reason);
            let id = insert_password_request(&pool.conn, &request)?;

            audit(
                &pool.conn,
                "passwd.request",
                &emp.code,
                &format!("reset requested, contact {contact}"),
            )?;

            success(format!("Password reset request #{id} submitted."));
        }

        PasswdAction::List => {
            let requests = load_password_requests(&pool.conn)?;
            if requests.is_empty() {
                info("No password reset requests.");
                return Ok(());
            }

            let codes: HashMap<i64, String> = load_employees(&pool.conn)?
                .into_iter()
                .map(|e| (e.id, e.code))
                .collect();

            let mut table =
                Table::new(vec!["ID", "Employee", "Email", "Reason", "Status", "Requested At"]);
            for req in &requests {
                let who = codes
                    .get(&req.employee_id)
                    .cloned()
                    .unwrap_or_else(|| format!("#{}", req.employee_id));
                table.add_row(vec![
                    req.id.to_string(),
                    who,
                    req.email.clone(),
                    req.reason.clone(),
                    req.status.to_db_str().to_string(),
                    req.created_at.clone(),
                ]);
            }
            print!("{}", table.render());
        }

        PasswdAction::Approve { id, temp, by } => {
            let request = get_password_request(&pool.conn, *id)?
                .ok_or_else(|| AppError::NotFound(format!("password request #{id}")))?;

            approve_password_reset(&mut pool.conn, &request, temp, by)?;
            success(format!(
                "Approved password request #{id}: temporary password issued."
            ));
        }

        PasswdAction::Reject { id, by } => {
            let request = get_password_request(&pool.conn, *id)?
                .ok_or_else(|| AppError::NotFound(format!("password request #{id}")))?;

            reject_password_reset(&mut pool.conn, &request, by)?;
            success(format!("Rejected password request #{id}."));
        }
    }

    Ok(())
}
