//! Presence status derived from a subject's most recent punch.

use crate::models::punch::Punch;
use crate::models::punch_kind::PunchKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    NotClockedIn,
    ClockedIn,
    ClockedOut,
    OnBreak,
    BackFromBreak,
}

impl Presence {
    pub fn label(&self) -> &'static str {
        match self {
            Presence::NotClockedIn => "Not Clocked In",
            Presence::ClockedIn => "Clocked In",
            Presence::ClockedOut => "Clocked Out",
            Presence::OnBreak => "On Break",
            Presence::BackFromBreak => "Returned from Break",
        }
    }
}

/// `last` is the punch with the greatest `(timestamp, id)` for the
/// subject, or None when no punch was ever recorded.
pub fn presence(last: Option<&Punch>) -> Presence {
    match last.map(|p| p.kind) {
        None => Presence::NotClockedIn,
        Some(PunchKind::In) => Presence::ClockedIn,
        Some(PunchKind::Out) => Presence::ClockedOut,
        Some(PunchKind::BreakIn) => Presence::OnBreak,
        Some(PunchKind::BreakOut) => Presence::BackFromBreak,
    }
}
