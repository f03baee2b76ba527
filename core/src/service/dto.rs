use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::item::{item_label, TrackedItem};
use crate::model::synthesis::{format_signed, SynthesisKind, SynthesisResult, Tone};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatLine {
    pub item_id: String,
    pub name: String,
    pub emoji: String,
    pub value: i64,
}

impl StatLine {
    pub fn label(&self) -> String {
        item_label(&self.emoji, &self.name)
    }

    /// `+3`, `0`, `-2`
    pub fn signed_value(&self) -> String {
        format_signed(self.value)
    }

    pub fn tone(&self) -> Tone {
        Tone::of(self.value)
    }
}

/// Everything a renderer or exporter needs for one window of one student.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SynthesisReport {
    pub kind: SynthesisKind,
    pub title: String,
    pub student_name: String,
    pub period_label: String,
    pub generated_on: NaiveDate,
    pub lines: Vec<StatLine>,
}

impl SynthesisReport {
    pub fn from_result(
        result: &SynthesisResult,
        items: &[TrackedItem],
        student_name: &str,
        generated_on: NaiveDate,
    ) -> Self {
        let lines = result
            .rows(items)
            .map(|(item, value)| StatLine {
                item_id: item.id.clone(),
                name: item.name.clone(),
                emoji: item.emoji.clone(),
                value,
            })
            .collect();

        Self {
            kind: result.kind,
            title: result.kind.title().to_string(),
            student_name: student_name.to_string(),
            period_label: result.period_label.clone(),
            generated_on,
            lines,
        }
    }

    /// True when no item is configured for the student.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::synthesis::Totals;

    #[test]
    fn test_lines_follow_items_with_item_labels() {
        let items = vec![
            TrackedItem::new("retard", "Retard", "⏰"),
            TrackedItem::new("calme", "Calme", ""),
        ];
        let mut totals = Totals::zeroed(&items);
        totals.add("retard", -2);
        let result = SynthesisResult {
            kind: SynthesisKind::Week,
            totals,
            period_label: "13/10/2025 - 17/10/2025".to_string(),
        };

        let report = SynthesisReport::from_result(
            &result,
            &items,
            "Camille",
            NaiveDate::from_ymd_opt(2025, 10, 18).unwrap(),
        );

        assert_eq!(report.title, "Synthèse de la semaine");
        assert_eq!(report.lines.len(), 2);
        for (line, item) in report.lines.iter().zip(&items) {
            assert_eq!(line.label(), item.label());
        }
        assert_eq!(report.lines[0].signed_value(), "-2");
        assert_eq!(report.lines[0].tone(), Tone::Negative);
        assert_eq!(report.lines[1].signed_value(), "0");
    }
}
