use crate::cli::parser::{Cli, Commands, EmployeeAction};
use crate::config::Config;
use crate::core::session::Session;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_employee, find_employee_by_code, insert_employee, load_employees,
    update_employee_password,
};
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::ui::messages::{info, success, warning};
use crate::utils::table::Table;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Employee { action } = &cli.command else {
        return Ok(());
    };

    Session::open(cfg, cli.store_key.as_deref())?;
    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        EmployeeAction::Add {
            code,
            name,
            email,
            password,
            admin,
        } => {
            if find_employee_by_code(&pool.conn, code)?.is_some() {
                return Err(AppError::Validation(format!(
                    "employee code {code} already exists"
                )));
            }

            let emp = Employee::new(code, name, email.clone(), password, *admin);
            insert_employee(&pool.conn, &emp)?;
            audit(&pool.conn, "employee.add", code, &format!("added {name}"))?;
            success(format!("Added employee {name} ({code})."));
        }

        EmployeeAction::List => {
            let employees = load_employees(&pool.conn)?;
            if employees.is_empty() {
                info("No employees registered.");
                return Ok(());
            }

            let mut table = Table::new(vec!["Code", "Name", "Email", "Role", "Created"]);
            for emp in &employees {
                table.add_row(vec![
                    emp.code.clone(),
                    emp.name.clone(),
                    emp.email.clone().unwrap_or_else(|| "—".to_string()),
                    if emp.is_admin { "admin" } else { "staff" }.to_string(),
                    emp.created_at.clone(),
                ]);
            }
            print!("{}", table.render());
        }

        EmployeeAction::Remove { code } => {
            if delete_employee(&mut pool.conn, code)? {
                success(format!("Removed employee {code} and their records."));
            } else {
                warning(format!("No employee with code {code}."));
            }
        }

        EmployeeAction::SetPassword { code, password } => {
            let emp = find_employee_by_code(&pool.conn, code)?
                .ok_or_else(|| AppError::NotFound(format!("employee {code}")))?;

            update_employee_password(&pool.conn, emp.id, password)?;
            audit(&pool.conn, "employee.set-password", code, "password set by admin")?;
            success(format!("Password updated for {code}."));
        }

        EmployeeAction::ChangePassword { code, old, new } => {
            let emp = find_employee_by_code(&pool.conn, code)?
                .ok_or_else(|| AppError::NotFound(format!("employee {code}")))?;

            // plaintext comparison, matching the system's (non-)promises
            if emp.password != *old {
                return Err(AppError::AuthFailed(code.clone()));
            }
            if new.is_empty() {
                return Err(AppError::Validation("new password must not be empty".into()));
            }

            update_employee_password(&pool.conn, emp.id, new)?;
            audit(&pool.conn, "employee.change-password", code, "password changed")?;
            success(format!("Password changed for {code}. Please log in again."));
        }
    }

    Ok(())
}
