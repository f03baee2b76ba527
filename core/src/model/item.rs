use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrackedItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
}

impl TrackedItem {
    pub fn new(id: &str, name: &str, emoji: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            emoji: emoji.to_string(),
        }
    }

    pub fn label(&self) -> String {
        item_label(&self.emoji, &self.name)
    }
}

/// `emoji name`, or just the name when no emoji is set.
pub fn item_label(emoji: &str, name: &str) -> String {
    if emoji.is_empty() {
        name.to_string()
    } else {
        format!("{} {}", emoji, name)
    }
}

/// Class-wide items followed by the student's own, in that order.
/// Duplicated ids are kept; totals are keyed by id so they share one entry.
pub fn active_items(class_items: &[TrackedItem], student_items: &[TrackedItem]) -> Vec<TrackedItem> {
    let items: Vec<TrackedItem> = class_items.iter().chain(student_items).cloned().collect();

    for (i, item) in items.iter().enumerate() {
        if items[..i].iter().any(|other| other.id == item.id) {
            tracing::warn!("Tracked item id '{}' is declared more than once", item.id);
        }
    }

    items
}
