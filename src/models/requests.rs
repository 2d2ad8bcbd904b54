use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::PointOfInterest;

/// Request to match the loaded events against a list of POIs
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GeoMatchRequest {
    #[validate(length(min = 1))]
    #[serde(default, alias = "pointsOfInterest")]
    pub points_of_interest: Vec<PointOfInterest>,
}
