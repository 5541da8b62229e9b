use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::session::Session;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::insert_punch;
use crate::errors::{AppError, AppResult};
use crate::models::punch::Punch;
use crate::models::punch_kind::PunchKind;
use crate::ui::messages::success;
use crate::utils::time::parse_timestamp;
use chrono::Local;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Punch {
        employee,
        kind,
        at,
        password,
    } = &cli.command
    else {
        return Ok(());
    };

    let mut session = Session::open(cfg, cli.store_key.as_deref())?;
    let mut pool = DbPool::new(&cfg.database)?;

    let actor = session.login(&mut pool, employee, password.as_deref())?;

    let kind = PunchKind::parse_cli(kind)
        .ok_or_else(|| AppError::InvalidPunchKind(kind.clone()))?;

    let timestamp = match at {
        Some(raw) => parse_timestamp(raw)?,
        None => Local::now().naive_local(),
    };

    let punch = Punch::new(actor.id, kind, timestamp);
    insert_punch(&pool.conn, &punch)?;

    audit(
        &pool.conn,
        "punch",
        &actor.code,
        &format!("{} at {}", kind.to_db_str(), punch.timestamp_str()),
    )?;

    success(format!(
        "Punch {} recorded for {} at {}.",
        kind.to_db_str(),
        actor.name,
        punch.timestamp_str()
    ));

    Ok(())
}
