use chrono::NaiveDate;

use crate::calendar::{day_name, week_type, DayName};
use crate::model::student::{ScheduleMap, Student};

/// Picks the A or B timetable of a student for a given date.
pub struct ScheduleResolver<'a> {
    student: &'a Student,
    school_year_start: NaiveDate,
}

impl<'a> ScheduleResolver<'a> {
    pub fn new(student: &'a Student, school_year_start: NaiveDate) -> Self {
        Self {
            student,
            school_year_start,
        }
    }

    pub fn schedule_for(&self, date: NaiveDate) -> Option<&'a ScheduleMap> {
        self.student.schedule(week_type(date, self.school_year_start))
    }

    pub fn is_active(&self, date: NaiveDate, day: DayName, slot: &str) -> bool {
        self.schedule_for(date)
            .map(|schedule| schedule.is_active(day, slot))
            .unwrap_or(false)
    }

    /// Slot ids active on `date`, in the order of `slots`.
    pub fn active_slots<'s>(&self, date: NaiveDate, slots: &'s [String]) -> Vec<&'s str> {
        let Some(schedule) = self.schedule_for(date) else {
            return Vec::new();
        };
        let day = day_name(date);
        slots
            .iter()
            .map(String::as_str)
            .filter(|slot| schedule.is_active(day, slot))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn slots() -> Vec<String> {
        vec!["M1".to_string(), "M2".to_string(), "S1".to_string()]
    }

    #[test]
    fn test_resolves_a_then_b() {
        let mut student = Student::new("s1", "Camille");
        student.schedule_a = Some(ScheduleMap::new().with_slot(DayName::Lundi, "M1"));
        student.schedule_b = Some(ScheduleMap::new().with_slot(DayName::Lundi, "S1"));
        let resolver = ScheduleResolver::new(&student, d(2025, 9, 1));

        assert_eq!(resolver.active_slots(d(2025, 9, 1), &slots()), vec!["M1"]);
        assert_eq!(resolver.active_slots(d(2025, 9, 8), &slots()), vec!["S1"]);
        assert!(resolver.is_active(d(2025, 9, 8), DayName::Lundi, "S1"));
        assert!(!resolver.is_active(d(2025, 9, 8), DayName::Lundi, "M1"));
    }

    #[test]
    fn test_missing_schedule_means_nothing_active() {
        let mut student = Student::new("s1", "Camille");
        student.schedule_a = Some(ScheduleMap::new().with_slot(DayName::Lundi, "M1"));
        let resolver = ScheduleResolver::new(&student, d(2025, 9, 1));

        assert!(resolver.schedule_for(d(2025, 9, 8)).is_none());
        assert!(resolver.active_slots(d(2025, 9, 8), &slots()).is_empty());
        assert!(!resolver.is_active(d(2025, 9, 8), DayName::Lundi, "M1"));
    }
}
