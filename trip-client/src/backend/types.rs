//! Request bodies and response envelopes for the backend endpoints.
//!
//! The payload types themselves live in `domain`; what's here is the
//! envelope shapes specific to each endpoint.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    GeoPoint, ModelInfo, RiderProfile, RouteProfile, RouteResult, TransitItinerary,
};

/// Body for `POST /api/osrm/routes`.
#[derive(Debug, Clone, Serialize)]
pub struct RoadRouteRequest {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub profiles: Vec<RouteProfile>,
}

impl RoadRouteRequest {
    /// A request covering all three profiles, as `computeAll` issues it.
    pub fn all_profiles(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            origin,
            destination,
            profiles: RouteProfile::ALL.to_vec(),
        }
    }
}

/// Response from `POST /api/osrm/routes`.
#[derive(Debug, Clone, Deserialize)]
pub struct RoadRouteResponse {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub results: Vec<RouteResult>,
}

/// Body for `POST /api/otp/routes`.
#[derive(Debug, Clone, Serialize)]
pub struct TransitRouteRequest {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary_index: Option<usize>,
}

/// Response from `POST /api/otp/routes`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitRouteResponse {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub result: TransitItinerary,
}

/// Body for `POST /api/lpmc/predict` and `/api/lpmc/debug-features`.
#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub user_profile: RiderProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary_index: Option<usize>,
}

/// Response from `POST /api/lpmc/debug-features`.
#[derive(Debug, Clone, Deserialize)]
pub struct DebugFeaturesResponse {
    pub feature_names: Vec<String>,
    pub raw_features: HashMap<String, f64>,
    pub scaled_features: HashMap<String, f64>,
    /// Which columns the scaler was applied to.
    #[serde(default)]
    pub scaled_columns: Vec<String>,
    pub route_features: HashMap<String, f64>,
    #[serde(default)]
    pub model_info: ModelInfo,
}
