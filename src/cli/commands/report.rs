use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::report::{ReportRange, ReportRow, build_report_row};
use crate::core::session::Session;
use crate::db::pool::DbPool;
use crate::db::queries::{find_employee_by_code, load_employees, load_punches};
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::ui::messages::info;
use crate::utils::table::Table;
use crate::utils::time::{format_hours, parse_date};
use chrono::Local;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Report {
        from,
        to,
        daily: _,
        biweekly,
        employees,
    } = &cli.command
    else {
        return Ok(());
    };

    Session::open(cfg, cli.store_key.as_deref())?;
    let mut pool = DbPool::new(&cfg.database)?;

    let range = resolve_range(from.as_deref(), to.as_deref(), *biweekly)?;
    let selected = resolve_employees(&mut pool, employees)?;

    if selected.is_empty() {
        info("No employees registered.");
        return Ok(());
    }

    let rows = build_rows(&mut pool, &selected, range)?;

    println!("Report {} → {}", range.from, range.to);
    let mut table = Table::new(vec!["Name", "Worked Hours", "Break Hours", "Total Hours"]);
    for row in &rows {
        table.add_row(vec![
            row.name.clone(),
            format_hours(row.worked_hours),
            format_hours(row.break_hours),
            format_hours(row.total_hours),
        ]);
    }
    print!("{}", table.render());

    Ok(())
}

pub fn resolve_range(
    from: Option<&str>,
    to: Option<&str>,
    biweekly: bool,
) -> AppResult<ReportRange> {
    let today = Local::now().date_naive();

    match (from, to) {
        (Some(f), Some(t)) => ReportRange::custom(parse_date(f)?, parse_date(t)?),
        (None, None) => {
            if biweekly {
                Ok(ReportRange::biweekly(today))
            } else {
                Ok(ReportRange::daily(today))
            }
        }
        _ => Err(AppError::Validation(
            "--from and --to must be given together".into(),
        )),
    }
}

pub fn resolve_employees(pool: &mut DbPool, codes: &[String]) -> AppResult<Vec<Employee>> {
    if codes.is_empty() {
        return load_employees(&pool.conn);
    }

    let mut out = Vec::with_capacity(codes.len());
    for code in codes {
        let emp = find_employee_by_code(&pool.conn, code)?
            .ok_or_else(|| AppError::NotFound(format!("employee {code}")))?;
        out.push(emp);
    }
    Ok(out)
}

pub fn build_rows(
    pool: &mut DbPool,
    employees: &[Employee],
    range: ReportRange,
) -> AppResult<Vec<ReportRow>> {
    let mut rows = Vec::with_capacity(employees.len());
    for emp in employees {
        let punches = load_punches(&pool.conn, Some(emp.id))?;
        rows.push(build_report_row(emp, &punches, range));
    }
    Ok(rows)
}
