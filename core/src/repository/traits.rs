use crate::model::student::ClassRoster;
use crate::model::tracking::TrackingRecords;
use anyhow::Result;

/// Read-only access to the raw tracking deltas of a student.
pub trait TrackingStore {
    fn fetch_tracking_records(&self, class_id: &str, student_id: &str) -> Result<TrackingRecords>;
}

/// Read-only access to the students and class-wide items.
pub trait ClassRegistry {
    fn load_class(&self, class_id: &str) -> Result<ClassRoster>;
}
