use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

const MONTH_NAMES: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin",
    "juillet", "août", "septembre", "octobre", "novembre", "décembre",
];

/// Alternating timetable variant.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekType {
    A,
    B,
}

impl fmt::Display for WeekType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekType::A => write!(f, "A"),
            WeekType::B => write!(f, "B"),
        }
    }
}

/// Day of week as it appears in schedules and tracking keys.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayName {
    Dimanche,
    Lundi,
    Mardi,
    Mercredi,
    Jeudi,
    Vendredi,
    Samedi,
}

impl DayName {
    pub const SCHOOL_DAYS: [DayName; 5] = [
        DayName::Lundi,
        DayName::Mardi,
        DayName::Mercredi,
        DayName::Jeudi,
        DayName::Vendredi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayName::Dimanche => "Dimanche",
            DayName::Lundi => "Lundi",
            DayName::Mardi => "Mardi",
            DayName::Mercredi => "Mercredi",
            DayName::Jeudi => "Jeudi",
            DayName::Vendredi => "Vendredi",
            DayName::Samedi => "Samedi",
        }
    }
}

impl From<Weekday> for DayName {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => DayName::Dimanche,
            Weekday::Mon => DayName::Lundi,
            Weekday::Tue => DayName::Mardi,
            Weekday::Wed => DayName::Mercredi,
            Weekday::Thu => DayName::Jeudi,
            Weekday::Fri => DayName::Vendredi,
            Weekday::Sat => DayName::Samedi,
        }
    }
}

impl fmt::Display for DayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Dimanche" => Ok(DayName::Dimanche),
            "Lundi" => Ok(DayName::Lundi),
            "Mardi" => Ok(DayName::Mardi),
            "Mercredi" => Ok(DayName::Mercredi),
            "Jeudi" => Ok(DayName::Jeudi),
            "Vendredi" => Ok(DayName::Vendredi),
            "Samedi" => Ok(DayName::Samedi),
            _ => Err(anyhow!("Unknown day name: {}", s)),
        }
    }
}

/// Identifies one calendar week, rendered as `2025-W03`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

impl WeekKey {
    /// Parses the two hyphen-separated segments of a stored week key.
    pub fn from_parts(year: &str, week: &str) -> Result<Self> {
        let year: i32 = year.parse().map_err(|_| anyhow!("Invalid year: {}", year))?;
        let week: u32 = week
            .strip_prefix('W')
            .and_then(|w| w.parse().ok())
            .ok_or_else(|| anyhow!("Invalid week: {}", week))?;
        if !(1..=53).contains(&week) {
            return Err(anyhow!("Week out of range: {}", week));
        }
        Ok(WeekKey { year, week })
    }
}

impl FromStr for WeekKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (year, week) = s
            .split_once('-')
            .ok_or_else(|| anyhow!("Invalid week key: {}", s))?;
        WeekKey::from_parts(year, week)
    }
}

/// ISO-8601 week number (Monday start, week 1 holds the first Thursday).
pub fn week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// The key uses the ISO week-based year, so 2024-12-30 belongs to `2025-W01`.
pub fn week_key(date: NaiveDate) -> WeekKey {
    let iso = date.iso_week();
    WeekKey {
        year: iso.year(),
        week: iso.week(),
    }
}

pub fn day_name(date: NaiveDate) -> DayName {
    DayName::from(date.weekday())
}

pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// A/B classification: parity of whole weeks elapsed since the week holding
/// `school_year_start`. The start week is an A week.
pub fn week_type(date: NaiveDate, school_year_start: NaiveDate) -> WeekType {
    let elapsed = (monday_of(date) - monday_of(school_year_start)).num_days() / 7;
    if elapsed.rem_euclid(2) == 0 {
        WeekType::A
    } else {
        WeekType::B
    }
}

/// Monday to Friday span of the week holding `date`. Sunday belongs to the
/// week that started on the preceding Monday.
pub fn week_date_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = monday_of(date);
    (monday, monday + Duration::days(4))
}

pub fn format_short(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `dimanche 18 octobre 2026`
pub fn format_long(date: NaiveDate) -> String {
    format!(
        "{} {} {} {}",
        day_name(date).as_str().to_lowercase(),
        date.day(),
        MONTH_NAMES[date.month0() as usize],
        date.year()
    )
}

pub fn period_label(start: NaiveDate, end: NaiveDate) -> String {
    format!("Du {} au {}", format_short(start), format_short(end))
}

pub fn week_range_label(date: NaiveDate) -> String {
    let (monday, friday) = week_date_range(date);
    format!("{} - {}", format_short(monday), format_short(friday))
}
