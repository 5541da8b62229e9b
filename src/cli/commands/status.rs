use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::presence::presence;
use crate::core::session::Session;
use crate::db::pool::DbPool;
use crate::db::queries::{find_employee_by_code, last_punch};
use crate::errors::{AppError, AppResult};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Status { employee } = &cli.command else {
        return Ok(());
    };

    Session::open(cfg, cli.store_key.as_deref())?;
    let pool = DbPool::new(&cfg.database)?;

    let emp = find_employee_by_code(&pool.conn, employee)?
        .ok_or_else(|| AppError::NotFound(format!("employee {employee}")))?;

    let last = last_punch(&pool.conn, emp.id)?;
    let state = presence(last.as_ref());

    println!("{} ({})", emp.name, emp.code);
    println!("Current Status: {}", state.label());
    if let Some(p) = last {
        println!("Last punch: {} @ {}", p.kind.to_db_str(), p.timestamp_str());
    }

    Ok(())
}
