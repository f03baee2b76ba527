use chrono::{Duration, NaiveDate};

use crate::calendar::{day_name, week_date_range, week_key};
use crate::error::SynthesisError;
use crate::model::item::TrackedItem;
use crate::model::student::Student;
use crate::model::synthesis::Totals;
use crate::model::tracking::{TrackingKey, TrackingRecords};
use crate::usecase::schedule::ScheduleResolver;

/// Dates an aggregation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateScope {
    Day(NaiveDate),
    /// Monday to Friday of the week holding the date.
    SchoolWeek(NaiveDate),
    /// Inclusive on both ends.
    Range { start: NaiveDate, end: NaiveDate },
    /// Every stored record, regardless of schedule.
    YearToDate,
}

impl DateScope {
    /// Inclusive date bounds, `None` for year-to-date.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            DateScope::Day(date) => Some((date, date)),
            DateScope::SchoolWeek(date) => Some(week_date_range(date)),
            DateScope::Range { start, end } => Some((start, end)),
            DateScope::YearToDate => None,
        }
    }
}

/// Everything one aggregation reads. Nothing here is mutated.
pub struct AggregationContext<'a> {
    pub student: &'a Student,
    pub items: &'a [TrackedItem],
    pub records: &'a TrackingRecords,
    pub slots: &'a [String],
    pub school_year_start: NaiveDate,
}

impl<'a> AggregationContext<'a> {
    pub fn aggregate(&self, scope: DateScope) -> Result<Totals, SynthesisError> {
        if let DateScope::Range { start, end } = scope {
            if start > end {
                return Err(SynthesisError::InvalidRange { start, end });
            }
        }

        match scope.bounds() {
            Some((start, end)) => Ok(self.sum_dates(start, end)),
            None => Ok(self.sum_all_records()),
        }
    }

    fn sum_dates(&self, start: NaiveDate, end: NaiveDate) -> Totals {
        let mut totals = Totals::zeroed(self.items);
        let resolver = ScheduleResolver::new(self.student, self.school_year_start);

        let mut date = start;
        while date <= end {
            self.sum_day(&resolver, date, &mut totals);
            date += Duration::days(1);
        }

        totals
    }

    fn sum_day(&self, resolver: &ScheduleResolver<'_>, date: NaiveDate, totals: &mut Totals) {
        let week = week_key(date);
        let day = day_name(date);

        for slot in resolver.active_slots(date, self.slots) {
            for item in self.items {
                let key = TrackingKey::new(week, day, slot, &item.id);
                totals.add(&item.id, self.records.get(&key));
            }
        }
    }

    fn sum_all_records(&self) -> Totals {
        let mut totals = Totals::zeroed(self.items);
        let mut skipped = 0usize;

        for (raw_key, delta) in self.records.iter() {
            match TrackingKey::item_segment(raw_key) {
                Some(item) => {
                    totals.add(item, delta);
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} tracking keys with fewer than five segments", skipped);
        }

        totals
    }
}
