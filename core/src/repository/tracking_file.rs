use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::model::tracking::TrackingRecords;
use crate::repository::traits::TrackingStore;

const TRACKING_DIR_NAME: &str = "tracking";

/// Reads `<base_dir>/<class_id>/tracking/<student_id>.json`, a flat object of
/// tracking keys to integer deltas.
#[derive(Clone)]
pub struct FileTrackingStore {
    base_dir: PathBuf,
}

impl FileTrackingStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn record_path(&self, class_id: &str, student_id: &str) -> PathBuf {
        self.base_dir
            .join(class_id)
            .join(TRACKING_DIR_NAME)
            .join(format!("{}.json", student_id))
    }
}

impl TrackingStore for FileTrackingStore {
    fn fetch_tracking_records(&self, class_id: &str, student_id: &str) -> Result<TrackingRecords> {
        let path = self.record_path(class_id, student_id);
        if !path.exists() {
            tracing::debug!("No tracking file at {}", path.display());
            return Ok(TrackingRecords::new());
        }

        let file = File::open(&path)
            .with_context(|| format!("failed to open tracking file {}", path.display()))?;
        let reader = BufReader::new(file);
        let records: TrackingRecords = serde_json::from_reader(reader)
            .with_context(|| format!("failed to parse tracking file {}", path.display()))?;

        tracing::debug!("Loaded {} tracking records for {}", records.len(), student_id);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tracking-store-{}", Uuid::new_v4()));
        fs::create_dir_all(dir.join("4eme5").join(TRACKING_DIR_NAME)).unwrap();
        dir
    }

    #[test]
    fn test_reads_student_file() {
        let dir = temp_dir();
        fs::write(
            dir.join("4eme5").join(TRACKING_DIR_NAME).join("s1.json"),
            r#"{ "2025-W36-Lundi-M1-retard": 3 }"#,
        )
        .unwrap();

        let store = FileTrackingStore::new(dir.clone());
        let records = store.fetch_tracking_records("4eme5", "s1").unwrap();
        assert_eq!(records.len(), 1);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = temp_dir();
        let store = FileTrackingStore::new(dir.clone());
        assert!(store.fetch_tracking_records("4eme5", "nobody").unwrap().is_empty());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = temp_dir();
        fs::write(dir.join("4eme5").join(TRACKING_DIR_NAME).join("s1.json"), "not json").unwrap();

        let store = FileTrackingStore::new(dir.clone());
        assert!(store.fetch_tracking_records("4eme5", "s1").is_err());
        fs::remove_dir_all(dir).unwrap();
    }
}
