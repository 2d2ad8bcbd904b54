// Core algorithm exports
pub mod distance;
pub mod matcher;

pub use distance::{haversine_distance, euclidean_distance, DistanceMetric, Haversine, Euclidean, MetricKind};
pub use matcher::{Matcher, GeoMatcher, MatchError, nearest_poi, build_matcher};
