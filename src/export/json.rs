use super::model::PunchExport;
use crate::core::report::ReportRow;
use crate::errors::{AppError, AppResult};
use std::fs::File;
use std::path::Path;

pub fn write_report_json(path: &Path, rows: &[ReportRow]) -> AppResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, rows).map_err(|e| AppError::Export(e.to_string()))?;
    Ok(())
}

pub fn write_punches_json(path: &Path, rows: &[PunchExport]) -> AppResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, rows).map_err(|e| AppError::Export(e.to_string()))?;
    Ok(())
}
