use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::calendar::{DayName, WeekType};
use crate::error::SynthesisError;
use crate::model::item::TrackedItem;

/// Slots a student attends in one week variant, keyed `"<DayName>-<SlotId>"`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ScheduleMap(HashMap<String, bool>);

impl ScheduleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot_key(day: DayName, slot: &str) -> String {
        format!("{}-{}", day, slot)
    }

    pub fn with_slot(mut self, day: DayName, slot: &str) -> Self {
        self.0.insert(Self::slot_key(day, slot), true);
        self
    }

    pub fn is_active(&self, day: DayName, slot: &str) -> bool {
        self.0.get(&Self::slot_key(day, slot)).copied().unwrap_or(false)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub schedule_a: Option<ScheduleMap>,
    #[serde(default)]
    pub schedule_b: Option<ScheduleMap>,
    #[serde(default)]
    pub specific_items: Vec<TrackedItem>,
}

impl Student {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            schedule_a: None,
            schedule_b: None,
            specific_items: Vec::new(),
        }
    }

    pub fn schedule(&self, week_type: WeekType) -> Option<&ScheduleMap> {
        match week_type {
            WeekType::A => self.schedule_a.as_ref(),
            WeekType::B => self.schedule_b.as_ref(),
        }
    }
}

/// Students of a class and the items tracked for everyone.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ClassRoster {
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub items: Vec<TrackedItem>,
}

impl ClassRoster {
    pub fn find_student(&self, student_id: &str) -> Result<&Student, SynthesisError> {
        self.students
            .iter()
            .find(|s| s.id == student_id)
            .ok_or_else(|| SynthesisError::UnknownStudent(student_id.to_string()))
    }
}
