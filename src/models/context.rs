use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;

use super::{Occasion, ResolvedProfile, WeatherContext};

/// Fixed holiday table as (month, day)
const HOLIDAYS: [(u32, u32); 3] = [
    (12, 25), // Christmas
    (10, 31), // Halloween
    (7, 4),   // Independence Day
];

/// Hour from which a night run prepares for tomorrow
const TOMORROW_FROM_HOUR: u32 = 21;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=4 => TimeOfDay::Night,
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Season for a calendar month (1 = January)
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        }
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the recommendation is for right now or for the next day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Current,
    Tomorrow,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Current => "current",
            RequestKind::Tomorrow => "tomorrow",
        }
    }
}

/// Calendar and clock facts derived from the wall clock at resolution time
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimeContext {
    pub time_of_day: TimeOfDay,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub season: Season,
    pub hour: u32,
}

impl TimeContext {
    pub fn at(now: NaiveDateTime) -> Self {
        let date = now.date();
        let hour = now.hour();
        Self {
            time_of_day: TimeOfDay::from_hour(hour),
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            is_holiday: HOLIDAYS.contains(&(date.month(), date.day())),
            season: Season::from_month(date.month()),
            hour,
        }
    }

    /// Occasion whose style preference applies today
    pub fn occasion(&self) -> Occasion {
        if self.is_holiday {
            Occasion::Holiday
        } else if self.is_weekend {
            Occasion::Weekend
        } else {
            Occasion::Weekday
        }
    }

    /// Late-night runs prepare for the next day
    pub fn request_kind(&self) -> RequestKind {
        if self.hour >= TOMORROW_FROM_HOUR {
            RequestKind::Tomorrow
        } else {
            RequestKind::Current
        }
    }
}

/// Inputs that were defaulted or failed during a run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MissingField {
    Gender,
    Weather,
    Connection,
}

impl MissingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingField::Gender => "gender",
            MissingField::Weather => "weather",
            MissingField::Connection => "connection",
        }
    }
}

pub type MissingFields = BTreeSet<MissingField>;

/// Resolved, gap-filled view of the world for a single pipeline run
///
/// `weather` is only `Some` when it is usable. `weather_code` is kept from the raw reading even
/// when the rest of it is unusable. Nothing here is carried between runs.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContextSnapshot {
    pub weather: Option<WeatherContext>,
    pub weather_code: Option<u16>,
    pub profile: ResolvedProfile,
    pub time: TimeContext,
    pub missing_fields: MissingFields,
}

impl ContextSnapshot {
    pub fn is_missing(&self, field: MissingField) -> bool {
        self.missing_fields.contains(&field)
    }
}
