use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::ledger::hierarchy::{build_hierarchy, month_name};
use crate::core::ledger::reconcile::reconcile;
use crate::core::session::Session;
use crate::db::pool::DbPool;
use crate::db::queries::{find_employee_by_code, load_employees, load_punches};
use crate::errors::{AppError, AppResult};
use crate::models::punch::Punch;
use std::collections::HashMap;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::History { employee } = &cli.command else {
        return Ok(());
    };

    Session::open(cfg, cli.store_key.as_deref())?;
    let pool = DbPool::new(&cfg.database)?;

    // Per-employee view annotates pair durations; the all-employees view
    // only lists punches (durations across interleaved subjects would lie).
    let (punches, annotate) = match employee {
        Some(code) => {
            let emp = find_employee_by_code(&pool.conn, code)?
                .ok_or_else(|| AppError::NotFound(format!("employee {code}")))?;
            (load_punches(&pool.conn, Some(emp.id))?, true)
        }
        None => (load_punches(&pool.conn, None)?, false),
    };

    if punches.is_empty() {
        println!("No punches recorded.");
        return Ok(());
    }

    let names: HashMap<i64, (String, String)> = load_employees(&pool.conn)?
        .into_iter()
        .map(|e| (e.id, (e.code, e.name)))
        .collect();

    let hierarchy = build_hierarchy(&punches);

    for (year, months) in &hierarchy.years {
        println!("📅 {year}");
        for (month, weeks) in months {
            println!("  📆 {}", month_name(*month));
            for (week, days) in weeks {
                println!("    🗓️ Week {week}");
                for (date, bucket) in days {
                    println!("      {date}");
                    print_day(bucket, annotate, &names);
                }
            }
        }
    }

    Ok(())
}

fn print_day(bucket: &[Punch], annotate: bool, names: &HashMap<i64, (String, String)>) {
    let annotations = if annotate {
        reconcile(bucket)
    } else {
        vec![None; bucket.len()]
    };

    for (punch, annotation) in bucket.iter().zip(annotations) {
        let mut line = format!(
            "        {} {}",
            punch.kind.marker(),
            punch.kind.to_db_str()
        );

        if !annotate {
            if let Some((code, name)) = names.get(&punch.employee_id) {
                line.push_str(&format!(" {name} ({code})"));
            }
        }

        line.push_str(&format!(" @ {}", punch.time_str()));

        if let Some(a) = annotation {
            line.push_str(&format!(" ({a})"));
        }

        println!("{line}");
    }
}
