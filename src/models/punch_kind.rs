use serde::Serialize;

/// The four clock-event kinds an employee can record.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum PunchKind {
    In,
    Out,
    BreakIn,
    BreakOut,
}

impl PunchKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PunchKind::In => "IN",
            PunchKind::Out => "OUT",
            PunchKind::BreakIn => "BREAK_IN",
            PunchKind::BreakOut => "BREAK_OUT",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "IN" => Some(PunchKind::In),
            "OUT" => Some(PunchKind::Out),
            "BREAK_IN" => Some(PunchKind::BreakIn),
            "BREAK_OUT" => Some(PunchKind::BreakOut),
            _ => None,
        }
    }

    /// Lenient parse for CLI input: case-insensitive, `-` and `_` equivalent.
    pub fn parse_cli(s: &str) -> Option<Self> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "IN" => Some(PunchKind::In),
            "OUT" => Some(PunchKind::Out),
            "BREAK_IN" => Some(PunchKind::BreakIn),
            "BREAK_OUT" => Some(PunchKind::BreakOut),
            _ => None,
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self, PunchKind::In)
    }

    pub fn is_out(&self) -> bool {
        matches!(self, PunchKind::Out)
    }

    /// Marker shown next to the kind in history listings.
    pub fn marker(&self) -> &'static str {
        match self {
            PunchKind::In => "🟢",
            PunchKind::Out => "🔴",
            PunchKind::BreakIn | PunchKind::BreakOut => "☕",
        }
    }
}
