use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::model::student::ClassRoster;
use crate::repository::traits::ClassRegistry;

const CLASS_FILE_NAME: &str = "class.json";

/// Reads `<base_dir>/<class_id>/class.json`.
#[derive(Clone)]
pub struct FileClassRegistry {
    base_dir: PathBuf,
}

impl FileClassRegistry {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }
}

impl ClassRegistry for FileClassRegistry {
    fn load_class(&self, class_id: &str) -> Result<ClassRoster> {
        let path = self.base_dir.join(class_id).join(CLASS_FILE_NAME);
        let file = File::open(&path)
            .with_context(|| format!("failed to open class file {}", path.display()))?;
        let reader = BufReader::new(file);
        let roster: ClassRoster = serde_json::from_reader(reader)
            .with_context(|| format!("failed to parse class file {}", path.display()))?;

        tracing::debug!(
            "Loaded class {} with {} students and {} items",
            class_id,
            roster.students.len(),
            roster.items.len()
        );
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use uuid::Uuid;

    #[test]
    fn test_load_class() {
        let dir = std::env::temp_dir().join(format!("class-registry-{}", Uuid::new_v4()));
        fs::create_dir_all(dir.join("4eme5")).unwrap();
        fs::write(
            dir.join("4eme5").join(CLASS_FILE_NAME),
            r#"{
                "students": [
                    { "id": "s1", "name": "Camille", "scheduleA": { "Lundi-M1": true } }
                ],
                "items": [{ "id": "retard", "name": "Retard", "emoji": "⏰" }]
            }"#,
        )
        .unwrap();

        let registry = FileClassRegistry::new(dir.clone());
        let roster = registry.load_class("4eme5").unwrap();
        assert_eq!(roster.students.len(), 1);
        assert_eq!(roster.items[0].id, "retard");
        assert!(registry.load_class("missing").is_err());

        fs::remove_dir_all(dir).unwrap();
    }
}
