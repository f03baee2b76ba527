use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::item::TrackedItem;

/// The four reporting windows.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SynthesisKind {
    Today,
    Week,
    Custom,
    Total,
}

/// Chart slots. Today has no chart.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Week,
    Custom,
    Total,
}

impl SynthesisKind {
    pub const ALL: [SynthesisKind; 4] = [
        SynthesisKind::Today,
        SynthesisKind::Week,
        SynthesisKind::Custom,
        SynthesisKind::Total,
    ];

    pub fn chart_kind(&self) -> Option<ChartKind> {
        match self {
            SynthesisKind::Today => None,
            SynthesisKind::Week => Some(ChartKind::Week),
            SynthesisKind::Custom => Some(ChartKind::Custom),
            SynthesisKind::Total => Some(ChartKind::Total),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SynthesisKind::Today => "Synthèse du jour",
            SynthesisKind::Week => "Synthèse de la semaine",
            SynthesisKind::Custom => "Synthèse sur période personnalisée",
            SynthesisKind::Total => "Cumul total",
        }
    }

    /// Period label used when the window was never computed.
    pub fn fallback_label(&self) -> &'static str {
        match self {
            SynthesisKind::Today => "Aujourd'hui",
            SynthesisKind::Week => "Semaine en cours",
            SynthesisKind::Custom => "Période personnalisée",
            SynthesisKind::Total => "Depuis la rentrée",
        }
    }

    /// File name segment of CSV exports.
    pub fn csv_slug(&self) -> &'static str {
        match self {
            SynthesisKind::Today => "jour",
            SynthesisKind::Week => "semaine",
            SynthesisKind::Custom => "periode",
            SynthesisKind::Total => "totale",
        }
    }

    /// File name segment of PDF exports.
    pub fn pdf_slug(&self) -> &'static str {
        match self {
            SynthesisKind::Today => "today",
            SynthesisKind::Week => "week",
            SynthesisKind::Custom => "custom",
            SynthesisKind::Total => "total",
        }
    }
}

/// Sign class of a total, drives colors in every output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Neutral,
    Negative,
}

impl Tone {
    pub fn of(value: i64) -> Self {
        match value {
            v if v > 0 => Tone::Positive,
            v if v < 0 => Tone::Negative,
            _ => Tone::Neutral,
        }
    }
}

/// `+3`, `0`, `-2`
pub fn format_signed(value: i64) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

/// Per-item sums, one entry per active item id.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Totals(HashMap<String, i64>);

impl Totals {
    pub fn zeroed(items: &[TrackedItem]) -> Self {
        Self(items.iter().map(|item| (item.id.clone(), 0)).collect())
    }

    /// Adds `delta` to `item_id`. Returns false when the id is not tracked.
    pub fn add(&mut self, item_id: &str, delta: i64) -> bool {
        match self.0.get_mut(item_id) {
            Some(total) => {
                *total += delta;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, item_id: &str) -> i64 {
        self.0.get(item_id).copied().unwrap_or(0)
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.0.contains_key(item_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn merge(&mut self, other: &Totals) {
        for (id, value) in &other.0 {
            *self.0.entry(id.clone()).or_insert(0) += value;
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SynthesisResult {
    pub kind: SynthesisKind,
    pub totals: Totals,
    pub period_label: String,
}

impl SynthesisResult {
    /// One `(item, total)` pair per active item, in item order.
    pub fn rows<'a>(&'a self, items: &'a [TrackedItem]) -> impl Iterator<Item = (&'a TrackedItem, i64)> + 'a {
        items.iter().map(move |item| (item, self.totals.get(&item.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_totals_have_every_item() {
        let items = vec![TrackedItem::new("a", "A", ""), TrackedItem::new("b", "B", "")];
        let mut totals = Totals::zeroed(&items);

        assert!(totals.add("a", 2));
        assert!(!totals.add("zzz", 5));
        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get("a"), 2);
        assert!(totals.contains("b"));
        assert_eq!(totals.get("b"), 0);
    }

    #[test]
    fn test_tone_and_sign() {
        assert_eq!(Tone::of(3), Tone::Positive);
        assert_eq!(Tone::of(0), Tone::Neutral);
        assert_eq!(Tone::of(-1), Tone::Negative);
        assert_eq!(format_signed(3), "+3");
        assert_eq!(format_signed(0), "0");
        assert_eq!(format_signed(-2), "-2");
    }

    #[test]
    fn test_today_has_no_chart() {
        assert_eq!(SynthesisKind::Today.chart_kind(), None);
        assert_eq!(SynthesisKind::Total.chart_kind(), Some(ChartKind::Total));
    }
}
