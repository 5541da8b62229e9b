use crate::cli::parser::{Cli, Commands, RequestAction};
use crate::config::Config;
use crate::core::session::Session;
use crate::core::workflow::validate_edit_submission;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{
    approve_edit_request, deny_edit_request, find_employee_by_code, get_edit_request,
    insert_edit_request, load_edit_requests, load_employees,
};
use crate::errors::{AppError, AppResult};
use crate::models::edit_request::EditRequest;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;
use std::collections::HashMap;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Request { action } = &cli.command else {
        return Ok(());
    };

    let mut session = Session::open(cfg, cli.store_key.as_deref())?;
    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        RequestAction::Submit {
            employee,
            kind,
            at,
            comment,
            password,
        } => {
            let actor = session.login(&mut pool, employee, password.as_deref())?;

            let (kind, timestamp, comment) = validate_edit_submission(kind, at, comment)?;
            let request = EditRequest::new(actor.id, kind, timestamp, &comment);
            let id = insert_edit_request(&pool.conn, &request)?;

            audit(
                &pool.conn,
                "request.submit",
                &actor.code,
                &format!(
                    "claimed {} at {}",
                    kind.to_db_str(),
                    request.timestamp_str()
                ),
            )?;

            success(format!("Request #{id} submitted for admin approval."));
        }

        RequestAction::List { employee } => {
            let employee_id = match employee {
                Some(code) => Some(
                    find_employee_by_code(&pool.conn, code)?
                        .ok_or_else(|| AppError::NotFound(format!("employee {code}")))?
                        .id,
                ),
                None => None,
            };

            let requests = load_edit_requests(&pool.conn, employee_id)?;
            if requests.is_empty() {
                info("No pending requests.");
                return Ok(());
            }

            let names: HashMap<i64, (String, String)> = load_employees(&pool.conn)?
                .into_iter()
                .map(|e| (e.id, (e.code, e.name)))
                .collect();

            let mut table =
                Table::new(vec!["ID", "Employee", "Kind", "Requested Time", "Reason", "Status"]);
            for req in &requests {
                let who = names
                    .get(&req.employee_id)
                    .map(|(code, name)| format!("{name} ({code})"))
                    .unwrap_or_else(|| format!("#{}", req.employee_id));
                table.add_row(vec![
                    req.id.to_string(),
                    who,
                    req.kind.to_db_str().to_string(),
                    req.timestamp_str(),
                    req.comment.clone(),
                    req.status.to_db_str().to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        RequestAction::Approve { id } => {
            let request = get_edit_request(&pool.conn, *id)?
                .ok_or_else(|| AppError::NotFound(format!("edit request #{id}")))?;

            let punch = approve_edit_request(&mut pool.conn, &request)?;
            success(format!(
                "Approved request #{id}: materialized {} punch at {}.",
                punch.kind.to_db_str(),
                punch.timestamp_str()
            ));
        }

        RequestAction::Deny { id } => {
            let request = get_edit_request(&pool.conn, *id)?
                .ok_or_else(|| AppError::NotFound(format!("edit request #{id}")))?;

            deny_edit_request(&mut pool.conn, &request)?;
            success(format!("Denied request #{id}."));
        }
    }

    Ok(())
}
