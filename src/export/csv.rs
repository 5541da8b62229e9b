use super::model::PunchExport;
use crate::core::report::ReportRow;
use crate::errors::AppResult;
use crate::utils::time::format_hours;
use csv::Writer;
use std::path::Path;

/// Report CSV, same columns as the admin screen table.
pub fn write_report_csv(path: &Path, rows: &[ReportRow]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(["Name", "Worked Hours", "Break Hours", "Total Hours"])?;

    for row in rows {
        wtr.write_record(&[
            row.name.clone(),
            format_hours(row.worked_hours),
            format_hours(row.break_hours),
            format_hours(row.total_hours),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Raw punch list CSV.
pub fn write_punches_csv(path: &Path, rows: &[PunchExport]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(["employee", "kind", "timestamp", "source"])?;

    for row in rows {
        wtr.write_record(&[&row.employee, &row.kind, &row.timestamp, &row.source])?;
    }

    wtr.flush()?;
    Ok(())
}
