// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{PointOfInterest, Event, EventKind, MatchResult, IMPRESSION_TYPE, CLICK_TYPE};
pub use requests::GeoMatchRequest;
pub use responses::{HealthResponse, ErrorResponse};
