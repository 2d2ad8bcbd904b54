use crate::models::Event;
use crate::services::datasource::{EventSource, SourceError};
use parking_lot::RwLock;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

const FIELDS_PER_RECORD: usize = 3;

/// Event source backed by a CSV file
///
/// The file needs a header row naming `lat`, `lon` and `event_type` (any
/// order). Events are held in memory after `load`; `get` never touches disk.
pub struct CsvEventLoader {
    file_path: PathBuf,
    events: RwLock<Vec<Event>>,
}

impl CsvEventLoader {
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            events: RwLock::new(Vec::new()),
        }
    }

    /// Read the file and replace the in-memory event set
    ///
    /// On error the previously loaded events are kept.
    pub fn load(&self) -> Result<usize, SourceError> {
        let file = File::open(&self.file_path).map_err(|source| SourceError::Io {
            path: self.file_path.clone(),
            source,
        })?;

        let events = parse_events(file)?;
        let count = events.len();
        *self.events.write() = events;

        tracing::info!("Loaded {} events from {}", count, self.file_path.display());
        Ok(count)
    }
}

impl EventSource for CsvEventLoader {
    fn get(&self) -> Result<Vec<Event>, SourceError> {
        Ok(self.events.read().clone())
    }
}

/// Parse events from CSV data with a `lat,lon,event_type` header
///
/// Line numbers in errors are 1-based and count the header as line 1.
pub fn parse_events<R: Read>(reader: R) -> Result<Vec<Event>, SourceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.len() != FIELDS_PER_RECORD {
        return Err(SourceError::FieldCount {
            line: 1,
            expected: FIELDS_PER_RECORD,
            found: headers.len(),
        });
    }

    let column = |name: &str| headers.iter().position(|field| field == name);
    let (lat_idx, lon_idx, type_idx) = match (column("lat"), column("lon"), column("event_type")) {
        (Some(lat), Some(lon), Some(event_type)) => (lat, lon, event_type),
        _ => return Err(SourceError::MissingColumns),
    };

    let mut events = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = i + 2;

        if record.len() != FIELDS_PER_RECORD {
            return Err(SourceError::FieldCount {
                line,
                expected: FIELDS_PER_RECORD,
                found: record.len(),
            });
        }

        let lat = parse_coordinate(&record[lat_idx], "latitude", line)?;
        let lon = parse_coordinate(&record[lon_idx], "longitude", line)?;

        events.push(Event::new(lat, lon, &record[type_idx]));
    }

    Ok(events)
}

fn parse_coordinate(raw: &str, field: &'static str, line: usize) -> Result<f64, SourceError> {
    raw.parse::<f64>()
        .map_err(|_| SourceError::InvalidCoordinate {
            line,
            field,
            value: raw.to_string(),
        })
}
