//! Domain errors raised by the aggregation engine.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SynthesisError {
    #[error("La date de début ({start}) doit être avant la date de fin ({end})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Veuillez sélectionner les deux dates")]
    MissingBound,

    #[error("Unknown student: {0}")]
    UnknownStudent(String),

    #[error("Invalid tracking key: {0}")]
    InvalidTrackingKey(String),
}
