//! Hierarchical grouping of punches: year → month → week-of-month → day.
//!
//! Weeks are calendar-month slices (week 1 = days 1–7, week 2 = days 8–14,
//! and so on). They are NOT ISO weeks and never cross a month boundary.

use crate::models::punch::Punch;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

pub type DayBuckets = BTreeMap<NaiveDate, Vec<Punch>>;
pub type WeekBuckets = BTreeMap<u32, DayBuckets>;
pub type MonthBuckets = BTreeMap<u32, WeekBuckets>;

/// Derived view over a snapshot of punches. Never persisted; cheap to
/// recompute on every read at this data volume.
#[derive(Debug, Default, Clone)]
pub struct Hierarchy {
    pub years: BTreeMap<i32, MonthBuckets>,
}

/// Week-of-month for a day-of-month (1-based): ceil(day / 7).
pub fn week_of_month(day: u32) -> u32 {
    (day - 1) / 7 + 1
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

/// Group punches into the four-level hierarchy.
///
/// Accepts any input order and keeps the relative input order inside each
/// day bucket; callers that need reconciled durations must supply punches
/// already sorted by `(timestamp, id)`. Pure: no side effects, and an
/// empty input produces an empty hierarchy.
pub fn build_hierarchy(punches: &[Punch]) -> Hierarchy {
    let mut hierarchy = Hierarchy::default();

    for p in punches {
        let date = p.date();
        hierarchy
            .years
            .entry(date.year())
            .or_default()
            .entry(date.month())
            .or_default()
            .entry(week_of_month(date.day()))
            .or_default()
            .entry(date)
            .or_default()
            .push(p.clone());
    }

    hierarchy
}

impl Hierarchy {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Total number of punches held in leaf day buckets.
    pub fn event_count(&self) -> usize {
        self.days().map(|(_, bucket)| bucket.len()).sum()
    }

    /// Iterate leaf day buckets in (year, month, week, day) order.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &Vec<Punch>)> {
        self.years
            .values()
            .flat_map(|months| months.values())
            .flat_map(|weeks| weeks.values())
            .flat_map(|days| days.iter().map(|(date, bucket)| (*date, bucket)))
    }

    /// All punch ids across every leaf, flattened. Each input punch lands
    /// in exactly one (year, month, week, day) path, so this equals the
    /// input set of ids.
    pub fn flatten_ids(&self) -> Vec<i64> {
        self.days()
            .flat_map(|(_, bucket)| bucket.iter().map(|p| p.id))
            .collect()
    }
}
