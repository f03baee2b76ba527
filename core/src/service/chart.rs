use std::collections::HashMap;

use crate::model::item::TrackedItem;
use crate::model::synthesis::{ChartKind, SynthesisResult, Tone};

pub const CHART_TITLE: &str = "Répartition par item";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: i64,
    pub tone: Tone,
}

/// Data of one "total per item" bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub bars: Vec<ChartBar>,
}

impl BarChartSpec {
    /// Returns `None` for windows without a chart.
    pub fn build(result: &SynthesisResult, items: &[TrackedItem]) -> Option<Self> {
        let kind = result.kind.chart_kind()?;
        let bars = result
            .rows(items)
            .map(|(item, value)| ChartBar {
                label: item.label(),
                value,
                tone: Tone::of(value),
            })
            .collect();

        Some(Self {
            kind,
            title: CHART_TITLE.to_string(),
            bars,
        })
    }

    /// Largest magnitude among the bars, at least 1.
    pub fn max_magnitude(&self) -> u64 {
        self.bars
            .iter()
            .map(|bar| bar.value.unsigned_abs())
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

/// A chart currently on screen. Dropping it releases it.
#[derive(Debug)]
pub struct ChartInstance {
    pub spec: BarChartSpec,
    pub generation: u64,
}

impl Drop for ChartInstance {
    fn drop(&mut self) {
        tracing::trace!("Disposed {:?} chart #{}", self.spec.kind, self.generation);
    }
}

/// Owns at most one chart per slot. Replacing a chart disposes the previous
/// instance before the new one is installed.
#[derive(Debug, Default)]
pub struct ChartSlots {
    charts: HashMap<ChartKind, ChartInstance>,
    next_generation: u64,
    disposed: u64,
}

impl ChartSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, spec: BarChartSpec) -> &ChartInstance {
        let kind = spec.kind;
        if let Some(previous) = self.charts.remove(&kind) {
            drop(previous);
            self.disposed += 1;
        }

        self.next_generation += 1;
        let instance = ChartInstance {
            spec,
            generation: self.next_generation,
        };
        self.charts.entry(kind).or_insert(instance)
    }

    pub fn get(&self, kind: ChartKind) -> Option<&ChartInstance> {
        self.charts.get(&kind)
    }

    pub fn disposed_count(&self) -> u64 {
        self.disposed
    }
}
