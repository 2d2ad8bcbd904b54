//! Geomatch - nearest point-of-interest matching for impression and click events
//!
//! This library provides the matching engine used by the geomatch service.
//! Each event is assigned to its closest POI under a configurable distance
//! metric and impressions/clicks are aggregated per POI.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, GeoMatcher, MatchError, DistanceMetric, Haversine, Euclidean, MetricKind};
pub use crate::models::{PointOfInterest, Event, MatchResult, GeoMatchRequest};
pub use crate::services::{EventSource, SourceError, CsvEventLoader, StaticEventSource};
