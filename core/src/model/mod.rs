pub mod item;
pub mod student;
pub mod synthesis;
pub mod tracking;
