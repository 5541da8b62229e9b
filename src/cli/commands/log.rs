use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Log { print } = &cli.command else {
        return Ok(());
    };

    if !*print {
        info("Nothing to do: pass --print.");
        return Ok(());
    }

    let pool = DbPool::new(&cfg.database)?;
    let rows = load_log(&pool.conn)?;

    if rows.is_empty() {
        info("Audit log is empty.");
        return Ok(());
    }

    for (date, operation, target, message) in rows {
        println!("{date} | {operation} | {target} | {message}");
    }

    Ok(())
}
