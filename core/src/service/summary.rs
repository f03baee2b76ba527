use crate::model::item::TrackedItem;
use crate::model::synthesis::{SynthesisKind, SynthesisResult, Totals};

/// Latest result of each reporting window for the current view.
#[derive(Debug, Default)]
pub struct SummaryStore {
    today: Option<SynthesisResult>,
    week: Option<SynthesisResult>,
    custom: Option<SynthesisResult>,
    total: Option<SynthesisResult>,
}

impl SummaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, kind: SynthesisKind) -> &Option<SynthesisResult> {
        match kind {
            SynthesisKind::Today => &self.today,
            SynthesisKind::Week => &self.week,
            SynthesisKind::Custom => &self.custom,
            SynthesisKind::Total => &self.total,
        }
    }

    fn slot_mut(&mut self, kind: SynthesisKind) -> &mut Option<SynthesisResult> {
        match kind {
            SynthesisKind::Today => &mut self.today,
            SynthesisKind::Week => &mut self.week,
            SynthesisKind::Custom => &mut self.custom,
            SynthesisKind::Total => &mut self.total,
        }
    }

    /// Overwrites the slot of `result.kind`.
    pub fn record(&mut self, result: SynthesisResult) -> &SynthesisResult {
        self.slot_mut(result.kind).insert(result)
    }

    pub fn get(&self, kind: SynthesisKind) -> Option<&SynthesisResult> {
        self.slot(kind).as_ref()
    }

    pub fn custom_period_label(&self) -> Option<&str> {
        self.custom.as_ref().map(|r| r.period_label.as_str())
    }

    /// Result to export for `kind`. A window that was never computed exports
    /// as all zeros under its fallback label.
    pub fn export_view(&self, kind: SynthesisKind, items: &[TrackedItem]) -> SynthesisResult {
        match self.get(kind) {
            Some(result) => result.clone(),
            None => {
                tracing::warn!("Exporting {:?} before it was computed, totals are zero", kind);
                SynthesisResult {
                    kind,
                    totals: Totals::zeroed(items),
                    period_label: kind.fallback_label().to_string(),
                }
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
