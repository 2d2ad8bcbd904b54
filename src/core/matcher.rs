use crate::core::distance::{DistanceMetric, Euclidean, Haversine, MetricKind};
use crate::models::{MatchResult, PointOfInterest};
use crate::services::{EventSource, SourceError};
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by the matching engine
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("event source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
}

/// Assigns events to their nearest POI and aggregates counts per POI
pub trait GeoMatcher: Send + Sync {
    /// Match the current event set against `pois`
    ///
    /// Returns one result per POI in input order, or an empty list when
    /// either `pois` or the event set is empty.
    fn match_pois(&self, pois: &[PointOfInterest]) -> Result<Vec<MatchResult>, MatchError>;
}

/// Nearest-POI matcher bound to one distance metric and one event source
///
/// Holds no per-call state, so one instance can serve concurrent callers as
/// long as the event source supports concurrent reads.
#[derive(Clone)]
pub struct Matcher<M> {
    metric: M,
    source: Arc<dyn EventSource>,
}

impl<M: DistanceMetric> Matcher<M> {
    pub fn new(metric: M, source: Arc<dyn EventSource>) -> Self {
        Self { metric, source }
    }
}

impl Matcher<Haversine> {
    pub fn haversine(source: Arc<dyn EventSource>) -> Self {
        Self::new(Haversine, source)
    }
}

impl Matcher<Euclidean> {
    pub fn euclidean(source: Arc<dyn EventSource>) -> Self {
        Self::new(Euclidean, source)
    }
}

impl<M: DistanceMetric> GeoMatcher for Matcher<M> {
    fn match_pois(&self, pois: &[PointOfInterest]) -> Result<Vec<MatchResult>, MatchError> {
        let events = self.source.get()?;

        if pois.is_empty() || events.is_empty() {
            return Ok(Vec::new());
        }

        // One accumulator per input POI, index-aligned
        let mut results: Vec<MatchResult> = pois.iter().cloned().map(MatchResult::new).collect();

        for event in &events {
            if let Some(idx) = nearest_poi(&self.metric, event.lat, event.lon, pois) {
                results[idx].record(event.kind());
            }
        }

        tracing::debug!(
            "Matched {} events against {} points of interest",
            events.len(),
            pois.len()
        );

        Ok(results)
    }
}

/// Index of the POI closest to (`lat`, `lon`) under `metric`
///
/// Ties go to the POI that appears first. Returns `None` for an empty slice,
/// or when no distance compares below the initial bound (NaN coordinates).
pub fn nearest_poi<M: DistanceMetric + ?Sized>(
    metric: &M,
    lat: f64,
    lon: f64,
    pois: &[PointOfInterest],
) -> Option<usize> {
    let mut min_distance = f64::MAX;
    let mut closest = None;

    for (i, poi) in pois.iter().enumerate() {
        let distance = metric.distance(lat, lon, poi.lat, poi.lon);
        // strict comparison keeps the earliest POI on ties
        if distance < min_distance {
            min_distance = distance;
            closest = Some(i);
        }
    }

    closest
}

/// Build a matcher for the configured metric
pub fn build_matcher(kind: MetricKind, source: Arc<dyn EventSource>) -> Arc<dyn GeoMatcher> {
    match kind {
        MetricKind::Haversine => Arc::new(Matcher::haversine(source)),
        MetricKind::Euclidean => Arc::new(Matcher::euclidean(source)),
    }
}
