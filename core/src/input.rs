use anyhow::{anyhow, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::model::synthesis::SynthesisKind;

const KIND_NAMES: [&str; 4] = ["today", "week", "custom", "total"];

/// Resolves `key` against `candidates` by exact match, then unique prefix.
pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

pub fn parse_kind(input: &str) -> Result<SynthesisKind> {
    let key = expand_key(&input.to_lowercase(), &KIND_NAMES)?;
    match key.as_str() {
        "today" => Ok(SynthesisKind::Today),
        "week" => Ok(SynthesisKind::Week),
        "custom" => Ok(SynthesisKind::Custom),
        _ => Ok(SynthesisKind::Total),
    }
}

/// Parses a date relative to `today`:
/// `today`, `yesterday`, `+3d` / `-2w`, a weekday (`mon`, meaning the latest
/// one on or before today), `2025-09-01` or `01/09/2025`.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    let lowered = input.to_lowercase();

    match lowered.as_str() {
        "today" | "tod" | "aujourd'hui" => return Ok(today),
        "yesterday" | "hier" => {
            return today.pred_opt().ok_or_else(|| anyhow!("Date out of range: {}", input))
        }
        _ => {}
    }

    if let Some(offset) = parse_offset(&lowered)? {
        return today
            .checked_add_signed(offset)
            .ok_or_else(|| anyhow!("Invalid relative format: {}", input));
    }

    if let Ok(weekday) = parse_weekday_str(&lowered) {
        let back = (7 + today.weekday().num_days_from_monday() as i64
            - weekday.num_days_from_monday() as i64)
            % 7;
        return today
            .checked_sub_signed(Duration::days(back))
            .ok_or_else(|| anyhow!("Date out of range: {}", input));
    }

    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(input, "%d/%m/%Y") {
        return Ok(d);
    }

    Err(anyhow!("Could not parse date: {}", input))
}

fn parse_offset(input: &str) -> Result<Option<Duration>> {
    let sign = match input.chars().next() {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Ok(None),
    };
    let body = &input[1..];
    let invalid = || anyhow!("Invalid relative format: {}", input);
    let unit = body.chars().last().ok_or_else(invalid)?;
    let num_str = &body[..body.len() - unit.len_utf8()];
    let count: i64 = num_str.parse().map_err(|_| invalid())?;
    let count = count.checked_mul(sign).ok_or_else(invalid)?;

    let offset = match unit {
        'd' | 'j' => Duration::try_days(count),
        'w' | 's' => Duration::try_weeks(count),
        _ => return Err(anyhow!("Unknown unit in relative date: {}", unit)),
    };
    offset.map(Some).ok_or_else(invalid)
}

fn parse_weekday_str(s: &str) -> Result<Weekday> {
    match s {
        "mon" | "monday" | "lun" | "lundi" => Ok(Weekday::Mon),
        "tue" | "tuesday" | "mar" | "mardi" => Ok(Weekday::Tue),
        "wed" | "wednesday" | "mer" | "mercredi" => Ok(Weekday::Wed),
        "thu" | "thursday" | "jeu" | "jeudi" => Ok(Weekday::Thu),
        "fri" | "friday" | "ven" | "vendredi" => Ok(Weekday::Fri),
        "sat" | "saturday" | "sam" | "samedi" => Ok(Weekday::Sat),
        "sun" | "sunday" | "dim" | "dimanche" => Ok(Weekday::Sun),
        _ => Err(anyhow!("Invalid weekday")),
    }
}
