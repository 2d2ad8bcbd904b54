use crate::models::Event;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while producing the event set
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open events file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV header missing required fields: need lat, lon, event_type")]
    MissingColumns,

    #[error("expected {expected} fields at line {line}, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid {field} at line {line}: '{value}'")]
    InvalidCoordinate {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("event source unavailable: {0}")]
    Unavailable(String),
}

/// Read side of an event store
///
/// `get` returns the complete current event set. Callers never retain the
/// returned vector beyond one operation.
pub trait EventSource: Send + Sync {
    fn get(&self) -> Result<Vec<Event>, SourceError>;
}

/// Fixed in-memory event set
#[derive(Debug, Clone, Default)]
pub struct StaticEventSource {
    events: Vec<Event>,
}

impl StaticEventSource {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }
}

impl EventSource for StaticEventSource {
    fn get(&self) -> Result<Vec<Event>, SourceError> {
        Ok(self.events.clone())
    }
}
