use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calendar::{DayName, WeekKey};
use crate::error::SynthesisError;

/// One (week, day, slot, item) cell of the tracking store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackingKey {
    pub week: WeekKey,
    pub day: DayName,
    pub slot: String,
    pub item: String,
}

impl TrackingKey {
    pub fn new(week: WeekKey, day: DayName, slot: &str, item: &str) -> Self {
        Self {
            week,
            day,
            slot: slot.to_string(),
            item: item.to_string(),
        }
    }

    /// Item id of a raw key: everything after the fourth hyphen. The other
    /// segments are not checked. `None` when the key has fewer than five
    /// segments.
    pub fn item_segment(raw: &str) -> Option<&str> {
        raw.splitn(5, '-').nth(4)
    }

    /// Parses `"2025-W03-Lundi-M1-itemId"`. The first four hyphen-separated
    /// segments are year, week, day and slot; everything after the fourth
    /// hyphen is the item id, which may itself contain hyphens.
    pub fn parse(raw: &str) -> Result<Self, SynthesisError> {
        let invalid = || SynthesisError::InvalidTrackingKey(raw.to_string());

        let parts: Vec<&str> = raw.splitn(5, '-').collect();
        if parts.len() < 5 {
            return Err(invalid());
        }

        let week = WeekKey::from_parts(parts[0], parts[1]).map_err(|_| invalid())?;
        let day: DayName = parts[2].parse().map_err(|_| invalid())?;

        Ok(TrackingKey {
            week,
            day,
            slot: parts[3].to_string(),
            item: parts[4].to_string(),
        })
    }
}

impl fmt::Display for TrackingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}-{}", self.week, self.day, self.slot, self.item)
    }
}

/// Raw tracking deltas of one student, as stored.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct TrackingRecords(HashMap<String, i64>);

impl TrackingRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &TrackingKey, delta: i64) {
        self.0.insert(key.to_string(), delta);
    }

    /// Stored delta for `key`, 0 when absent.
    pub fn get(&self, key: &TrackingKey) -> i64 {
        self.0.get(&key.to_string()).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, i64)> for TrackingRecords {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_hyphens_in_item_id() {
        let key = TrackingKey::parse("2025-W03-Lundi-M1-bavardage-excessif").unwrap();
        assert_eq!(key.week, WeekKey { year: 2025, week: 3 });
        assert_eq!(key.day, DayName::Lundi);
        assert_eq!(key.slot, "M1");
        assert_eq!(key.item, "bavardage-excessif");
        assert_eq!(key.to_string(), "2025-W03-Lundi-M1-bavardage-excessif");
    }

    #[test]
    fn test_parse_rejects_short_or_malformed_keys() {
        assert!(TrackingKey::parse("2025-W03-Lundi-M1").is_err());
        assert!(TrackingKey::parse("2025-03-Lundi-M1-retard").is_err());
        assert!(TrackingKey::parse("2025-W03-Monday-M1-retard").is_err());
    }

    #[test]
    fn test_item_segment_ignores_leading_segments() {
        assert_eq!(TrackingKey::item_segment("2025-S3-monday-M1-oubli-materiel"), Some("oubli-materiel"));
        assert_eq!(TrackingKey::item_segment("2025-W03-Lundi-M1-"), Some(""));
        assert_eq!(TrackingKey::item_segment("2025-W03-Lundi-M1"), None);
    }

    #[test]
    fn test_missing_record_reads_as_zero() {
        let week = WeekKey { year: 2025, week: 3 };
        let mut records = TrackingRecords::new();
        records.insert(&TrackingKey::new(week, DayName::Lundi, "M1", "retard"), 2);

        assert_eq!(records.get(&TrackingKey::new(week, DayName::Lundi, "M1", "retard")), 2);
        assert_eq!(records.get(&TrackingKey::new(week, DayName::Lundi, "M2", "retard")), 0);
    }

    #[test]
    fn test_deserialize_flat_mapping() {
        let records: TrackingRecords =
            serde_json::from_str(r#"{ "2025-W03-Lundi-M1-retard": 3, "2025-W03-Mardi-S2-calme": -1 }"#)
                .unwrap();
        assert_eq!(records.len(), 2);
    }
}
