pub mod calendar;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod usecase;

pub use calendar::{day_name, week_date_range, week_key, week_number, week_type, DayName, WeekKey, WeekType};
pub use config::AppConfig;
pub use error::SynthesisError;
pub use export::{export_file_name, export_report, ExportFormat};
pub use input::{expand_key, parse_date, parse_kind};
pub use model::item::{active_items, item_label, TrackedItem};
pub use model::student::{ClassRoster, ScheduleMap, Student};
pub use model::synthesis::{format_signed, ChartKind, SynthesisKind, SynthesisResult, Tone, Totals};
pub use model::tracking::{TrackingKey, TrackingRecords};
pub use repository::{ClassRegistry, FileClassRegistry, FileTrackingStore, TrackingStore};
pub use service::chart::{BarChartSpec, ChartBar, ChartSlots};
pub use service::dto::{StatLine, SynthesisReport};
pub use service::summary::SummaryStore;
pub use service::synthesis_service::SynthesisService;
pub use usecase::aggregate::{AggregationContext, DateScope};
pub use usecase::schedule::ScheduleResolver;
