use serde::{Deserialize, Serialize};

/// Event type tag counted as an impression
pub const IMPRESSION_TYPE: &str = "imp";

/// Event type tag counted as a click
pub const CLICK_TYPE: &str = "click";

/// Named reference location supplied by the caller
///
/// Identity for aggregation is the position in the caller's list, not `name`:
/// two POIs with the same name are counted independently. Serialized with
/// capitalised keys (`Name`, `Lat`, `Lon`); lowercase keys are accepted on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Lat", alias = "lat")]
    pub lat: f64,
    #[serde(rename = "Lon", alias = "lon")]
    pub lon: f64,
}

impl PointOfInterest {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }
}

/// Recorded impression or click at a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub lat: f64,
    pub lon: f64,
    #[serde(alias = "type")]
    pub event_type: String,
}

impl Event {
    pub fn new(lat: f64, lon: f64, event_type: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            event_type: event_type.into(),
        }
    }

    /// Classify the open `event_type` string
    pub fn kind(&self) -> EventKind {
        EventKind::from(self.event_type.as_str())
    }
}

/// Event classification used for aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Impression,
    Click,
    /// Any other tag: assigned to a POI but counted toward neither metric
    Other,
}

impl From<&str> for EventKind {
    fn from(tag: &str) -> Self {
        match tag {
            IMPRESSION_TYPE => EventKind::Impression,
            CLICK_TYPE => EventKind::Click,
            _ => EventKind::Other,
        }
    }
}

/// Aggregated counts for one input POI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub poi: PointOfInterest,
    #[serde(rename = "Impressions", alias = "impressions")]
    pub impressions: i64,
    #[serde(rename = "Clicks", alias = "clicks")]
    pub clicks: i64,
}

impl MatchResult {
    /// Fresh accumulator with zero counts
    pub fn new(poi: PointOfInterest) -> Self {
        Self {
            poi,
            impressions: 0,
            clicks: 0,
        }
    }

    /// Route one event of the given kind into this accumulator
    #[inline]
    pub fn record(&mut self, kind: EventKind) {
        match kind {
            EventKind::Impression => self.impressions += 1,
            EventKind::Click => self.clicks += 1,
            EventKind::Other => {}
        }
    }
}
