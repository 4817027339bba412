// 🕒 Time Slots - column labels for a shift
// 24 half-hour slots starting at the shift's first hour, wrapping at midnight

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

/// Number of half-hour columns on the board (12 hours)
pub const SLOT_COUNT: usize = 24;

/// Minutes between two columns
pub const SLOT_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    #[default]
    Morning,
    Evening,
}

impl Shift {
    pub fn start_hour(&self) -> u32 {
        match self {
            Shift::Morning => 10,
            Shift::Evening => 22,
        }
    }

    /// Persisted value ("morning" / "evening")
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Morning => "morning",
            Shift::Evening => "evening",
        }
    }

    pub fn parse(value: &str) -> Option<Shift> {
        match value {
            "morning" => Some(Shift::Morning),
            "evening" => Some(Shift::Evening),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Shift {
        match self {
            Shift::Morning => Shift::Evening,
            Shift::Evening => Shift::Morning,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Shift::Morning => "Morning (10:00)",
            Shift::Evening => "Evening (22:00)",
        }
    }
}

/// Generate the 24 "HHMM" column headers for a shift.
///
/// NaiveTime addition wraps at 24:00, so the evening shift
/// runs 2200 ... 2330, 0000 ... 0930.
pub fn column_headers(shift: Shift) -> Vec<String> {
    let start = NaiveTime::from_hms_opt(shift.start_hour(), 0, 0).unwrap_or_default();
    let step = Duration::minutes(SLOT_MINUTES);

    std::iter::successors(Some(start), |t| Some(t.overflowing_add_signed(step).0))
        .take(SLOT_COUNT)
        .map(|t| t.format("%H%M").to_string())
        .collect()
}
