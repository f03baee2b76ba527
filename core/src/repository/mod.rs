pub mod class_file;
pub mod traits;
pub mod tracking_file;

// Re-export
pub use class_file::FileClassRegistry;
pub use traits::{ClassRegistry, TrackingStore};
pub use tracking_file::FileTrackingStore;
