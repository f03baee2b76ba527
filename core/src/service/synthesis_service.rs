use chrono::{Duration, NaiveDate};

use crate::calendar::{format_long, period_label, week_range_label};
use crate::config::AppConfig;
use crate::error::SynthesisError;
use crate::model::item::TrackedItem;
use crate::model::student::Student;
use crate::model::synthesis::{SynthesisKind, SynthesisResult};
use crate::model::tracking::TrackingRecords;
use crate::repository::TrackingStore;
use crate::service::summary::SummaryStore;
use crate::usecase::aggregate::{AggregationContext, DateScope};

/// Days before the reference date covered by the default custom period.
pub const DEFAULT_CUSTOM_SPAN_DAYS: i64 = 7;

/// Computes the syntheses of one student and keeps the latest of each window.
pub struct SynthesisService<S: TrackingStore> {
    store: S,
    class_id: String,
    school_year_start: NaiveDate,
    slots: Vec<String>,
    summaries: SummaryStore,
}

impl<S: TrackingStore> SynthesisService<S> {
    pub fn new(store: S, config: &AppConfig) -> Self {
        Self {
            store,
            class_id: config.class_id.clone(),
            school_year_start: config.school_year_start,
            slots: config.slots.clone(),
            summaries: SummaryStore::new(),
        }
    }

    pub fn summaries(&self) -> &SummaryStore {
        &self.summaries
    }

    pub fn school_year_start(&self) -> NaiveDate {
        self.school_year_start
    }

    /// Records of `student`, or an empty mapping when the store fails.
    fn fetch_records(&self, student: &Student) -> TrackingRecords {
        match self.store.fetch_tracking_records(&self.class_id, &student.id) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Could not load tracking data for {}: {:#}", student.id, e);
                TrackingRecords::new()
            }
        }
    }

    fn compute(
        &mut self,
        student: &Student,
        items: &[TrackedItem],
        kind: SynthesisKind,
        scope: DateScope,
        period_label: String,
    ) -> Result<&SynthesisResult, SynthesisError> {
        let records = self.fetch_records(student);
        let context = AggregationContext {
            student,
            items,
            records: &records,
            slots: &self.slots,
            school_year_start: self.school_year_start,
        };
        let totals = context.aggregate(scope)?;

        tracing::info!("Computed {:?} synthesis for {} ({})", kind, student.name, period_label);
        Ok(self.summaries.record(SynthesisResult {
            kind,
            totals,
            period_label,
        }))
    }

    pub fn compute_today(
        &mut self,
        student: &Student,
        items: &[TrackedItem],
        today: NaiveDate,
    ) -> Result<&SynthesisResult, SynthesisError> {
        self.compute(student, items, SynthesisKind::Today, DateScope::Day(today), format_long(today))
    }

    pub fn compute_week(
        &mut self,
        student: &Student,
        items: &[TrackedItem],
        today: NaiveDate,
    ) -> Result<&SynthesisResult, SynthesisError> {
        self.compute(
            student,
            items,
            SynthesisKind::Week,
            DateScope::SchoolWeek(today),
            week_range_label(today),
        )
    }

    /// Both bounds are required and `start` must not be after `end`.
    /// Nothing is fetched or stored when validation fails.
    pub fn compute_custom(
        &mut self,
        student: &Student,
        items: &[TrackedItem],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<&SynthesisResult, SynthesisError> {
        let (Some(start), Some(end)) = (start, end) else {
            return Err(SynthesisError::MissingBound);
        };
        if start > end {
            return Err(SynthesisError::InvalidRange { start, end });
        }

        self.compute(
            student,
            items,
            SynthesisKind::Custom,
            DateScope::Range { start, end },
            period_label(start, end),
        )
    }

    pub fn compute_total(
        &mut self,
        student: &Student,
        items: &[TrackedItem],
        today: NaiveDate,
    ) -> Result<&SynthesisResult, SynthesisError> {
        let label = period_label(self.school_year_start, today);
        self.compute(student, items, SynthesisKind::Total, DateScope::YearToDate, label)
    }

    /// Default custom period: the week leading up to `today`.
    pub fn default_custom_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
        (today - Duration::days(DEFAULT_CUSTOM_SPAN_DAYS), today)
    }

    /// Computes every window, as done when the synthesis view opens.
    pub fn load_all(
        &mut self,
        student: &Student,
        items: &[TrackedItem],
        today: NaiveDate,
    ) -> Result<(), SynthesisError> {
        self.compute_today(student, items, today)?;
        self.compute_week(student, items, today)?;
        self.compute_total(student, items, today)?;
        let (start, end) = Self::default_custom_range(today);
        self.compute_custom(student, items, Some(start), Some(end))?;
        Ok(())
    }
}
