use serde::Deserialize;
use std::fmt;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance between two coordinate pairs
///
/// Implementations must be pure, symmetric and return zero exactly when both
/// points coincide. Magnitudes are only comparable within one metric.
pub trait DistanceMetric: Send + Sync {
    fn distance(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64;
}

/// Great-circle distance in kilometers
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

/// Flat-plane distance in degrees, treating lat/lon as Cartesian coordinates
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl DistanceMetric for Haversine {
    #[inline]
    fn distance(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        haversine_distance(lat1, lon1, lat2, lon2)
    }
}

impl DistanceMetric for Euclidean {
    #[inline]
    fn distance(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        euclidean_distance(lat1, lon1, lat2, lon2)
    }
}

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    // rounding can push `a` just past 1.0 for near-antipodal points
    let a = ((delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Calculate the planar distance between two points, in degrees
///
/// Distorted over large spans and at high latitudes; fine for ranking
/// within a small cluster.
#[inline]
pub fn euclidean_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    (dlat * dlat + dlon * dlon).sqrt()
}

/// Metric selection as it appears in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    #[default]
    Haversine,
    Euclidean,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Haversine => write!(f, "haversine"),
            MetricKind::Euclidean => write!(f, "euclidean"),
        }
    }
}
