//! Duration reconciliation over one subject's chronologically ordered
//! punches: each OUT pairs with the nearest preceding IN, each BREAK_OUT
//! with the nearest preceding BREAK_IN.

use crate::models::punch::Punch;
use crate::models::punch_kind::PunchKind;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairLabel {
    Worked,
    Break,
}

impl PairLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PairLabel::Worked => "Worked",
            PairLabel::Break => "Break",
        }
    }
}

/// Elapsed-duration annotation attached to a closing punch.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub label: PairLabel,
    pub hours: f64,
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}h", self.label.as_str(), self.hours)
    }
}

/// Worked/break sums for one day bucket, in hours.
#[derive(Debug, Default, Clone, Copy)]
pub struct DayTotals {
    pub worked_hours: f64,
    pub break_hours: f64,
}

/// Annotate a day's punches with pair durations.
///
/// `punches` must belong to one subject and be sorted ascending by
/// `(timestamp, id)`. Returns one slot per input punch, in order.
///
/// A linear scan with `last_in` / `last_break_in` pointers, equivalent to
/// scanning backward from each closing punch. An opening punch is NOT
/// consumed by pairing: consecutive OUTs each report a duration against
/// the same IN when no new IN intervened. A closing punch with no opener
/// yet (e.g. the first recorded event of history) simply gets no
/// annotation; that is valid display state, not an error.
pub fn reconcile(punches: &[Punch]) -> Vec<Option<Annotation>> {
    let mut annotations = Vec::with_capacity(punches.len());
    let mut last_in: Option<&Punch> = None;
    let mut last_break_in: Option<&Punch> = None;

    for p in punches {
        let annotation = match p.kind {
            PunchKind::In => {
                last_in = Some(p);
                None
            }
            PunchKind::BreakIn => {
                last_break_in = Some(p);
                None
            }
            PunchKind::Out => last_in.map(|open| Annotation {
                label: PairLabel::Worked,
                hours: hours_between(open, p),
            }),
            PunchKind::BreakOut => last_break_in.map(|open| Annotation {
                label: PairLabel::Break,
                hours: hours_between(open, p),
            }),
        };
        annotations.push(annotation);
    }

    annotations
}

/// Sum the reconciled annotations of one day bucket.
pub fn day_totals(punches: &[Punch]) -> DayTotals {
    let mut totals = DayTotals::default();
    for annotation in reconcile(punches).into_iter().flatten() {
        match annotation.label {
            PairLabel::Worked => totals.worked_hours += annotation.hours,
            PairLabel::Break => totals.break_hours += annotation.hours,
        }
    }
    totals
}

fn hours_between(open: &Punch, close: &Punch) -> f64 {
    let secs = close.timestamp.signed_duration_since(open.timestamp).num_seconds();
    secs as f64 / 3600.0
}
