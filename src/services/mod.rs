// Service exports
pub mod csv_loader;
pub mod datasource;

pub use csv_loader::{CsvEventLoader, parse_events};
pub use datasource::{EventSource, SourceError, StaticEventSource};
