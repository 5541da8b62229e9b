use crate::cli::commands::report::{build_rows, resolve_range};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::session::Session;
use crate::db::pool::DbPool;
use crate::db::queries::{load_employees, load_punches};
use crate::errors::AppResult;
use crate::export::{
    ExportFormat, PunchExport, ensure_writable, notify_export_success, write_punches_csv,
    write_punches_json, write_report_csv, write_report_json, write_report_pdf,
};
use crate::models::employee::Employee;
use std::collections::HashMap;
use std::path::Path;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Export {
        format,
        file,
        from,
        to,
        punches,
        force,
    } = &cli.command
    else {
        return Ok(());
    };

    Session::open(cfg, cli.store_key.as_deref())?;
    let mut pool = DbPool::new(&cfg.database)?;

    let path = Path::new(file);
    ensure_writable(path, *force)?;

    // export defaults to the full ledger unless a range is given
    let range = match (from, to) {
        (None, None) => crate::core::report::ReportRange::unbounded(),
        _ => resolve_range(from.as_deref(), to.as_deref(), false)?,
    };

    if *punches {
        let employees = load_employees(&pool.conn)?;
        let codes: HashMap<i64, String> =
            employees.iter().map(|e| (e.id, e.code.clone())).collect();

        let rows: Vec<PunchExport> = load_punches(&pool.conn, None)?
            .iter()
            .filter(|p| range.contains(p.date()))
            .map(|p| {
                let code = codes
                    .get(&p.employee_id)
                    .map(String::as_str)
                    .unwrap_or("unknown");
                PunchExport::from_punch(code, p)
            })
            .collect();

        match format {
            ExportFormat::Csv => write_punches_csv(path, &rows)?,
            ExportFormat::Json => write_punches_json(path, &rows)?,
            ExportFormat::Pdf => {
                return Err(crate::errors::AppError::Export(
                    "PDF export is only available for reports".into(),
                ));
            }
        }
        notify_export_success("Punches", path);
        return Ok(());
    }

    let employees: Vec<Employee> = load_employees(&pool.conn)?;
    let rows = build_rows(&mut pool, &employees, range)?;

    match format {
        ExportFormat::Csv => write_report_csv(path, &rows)?,
        ExportFormat::Json => write_report_json(path, &rows)?,
        ExportFormat::Pdf => write_report_pdf(path, &cfg.report_title, &rows)?,
    }

    notify_export_success("Report", path);
    Ok(())
}
