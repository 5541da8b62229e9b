//! Per-employee worked/break/total hours over a date range.
//!
//! Totals are the sum of reconciler annotations over each day bucket in
//! the range, so the report always agrees with the history view.

use crate::core::ledger::hierarchy::build_hierarchy;
use crate::core::ledger::reconcile::day_totals;
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::models::punch::Punch;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Inclusive date range of a report.
#[derive(Debug, Clone, Copy)]
pub struct ReportRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ReportRange {
    /// Today only.
    pub fn daily(today: NaiveDate) -> Self {
        Self { from: today, to: today }
    }

    /// Last 14 days including today.
    pub fn biweekly(today: NaiveDate) -> Self {
        Self {
            from: today - Duration::days(13),
            to: today,
        }
    }

    pub fn custom(from: NaiveDate, to: NaiveDate) -> AppResult<Self> {
        if from > to {
            return Err(AppError::Validation(format!(
                "range start {from} is after range end {to}"
            )));
        }
        Ok(Self { from, to })
    }

    /// Everything ever recorded.
    pub fn unbounded() -> Self {
        Self {
            from: NaiveDate::MIN,
            to: NaiveDate::MAX,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub employee_code: String,
    pub name: String,
    pub worked_hours: f64,
    pub break_hours: f64,
    pub total_hours: f64,
}

/// Build one report row from an employee's punches, which must be sorted
/// ascending by `(timestamp, id)`. Employees without punches in range get
/// a zero row.
pub fn build_report_row(employee: &Employee, punches: &[Punch], range: ReportRange) -> ReportRow {
    let in_range: Vec<Punch> = punches
        .iter()
        .filter(|p| range.contains(p.date()))
        .cloned()
        .collect();

    let hierarchy = build_hierarchy(&in_range);

    let mut worked = 0.0;
    let mut breaks = 0.0;
    for (_, bucket) in hierarchy.days() {
        let totals = day_totals(bucket);
        worked += totals.worked_hours;
        breaks += totals.break_hours;
    }

    ReportRow {
        employee_code: employee.code.clone(),
        name: employee.name.clone(),
        worked_hours: round2(worked),
        break_hours: round2(breaks),
        total_hours: round2(worked + breaks),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
