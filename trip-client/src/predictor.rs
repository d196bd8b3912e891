//! Mode-choice predictor adapter.
//!
//! The prediction service derives its own trip features from the same
//! origin/destination/itinerary context the comparison layer uses; this
//! adapter's whole job is to hand it consistent coordinates, the rider
//! profile, and the exact itinerary index currently on display, so the
//! prediction always refers to what the user is looking at.

use crate::backend::{BackendError, DebugFeaturesResponse, PredictRequest, RoutingBackend};
use crate::domain::{GeoPoint, ModePrediction, ProfileError, RiderProfile};

/// Errors from the predictor adapter.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// The rider profile is outside the model's accepted ranges.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// The prediction request failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Assemble the request body shared by predict and debug calls.
fn build_request(
    origin: GeoPoint,
    destination: GeoPoint,
    profile: &RiderProfile,
    itinerary_index: Option<usize>,
) -> Result<PredictRequest, ProfileError> {
    profile.validate()?;
    Ok(PredictRequest {
        origin,
        destination,
        user_profile: profile.clone(),
        itinerary_index,
    })
}

/// Request a mode prediction for the given trip context.
///
/// `itinerary_index` must be the index currently selected in the pager
/// when a transit itinerary is on display, or `None` to let the service
/// make its own transit pick.
pub async fn predict<B: RoutingBackend>(
    backend: &B,
    origin: GeoPoint,
    destination: GeoPoint,
    profile: &RiderProfile,
    itinerary_index: Option<usize>,
) -> Result<ModePrediction, PredictError> {
    let request = build_request(origin, destination, profile, itinerary_index)?;
    Ok(backend.predict(&request).await?)
}

/// Request the full feature vector behind a prediction, for diagnostics.
pub async fn debug_features<B: RoutingBackend>(
    backend: &B,
    origin: GeoPoint,
    destination: GeoPoint,
    profile: &RiderProfile,
    itinerary_index: Option<usize>,
) -> Result<DebugFeaturesResponse, PredictError> {
    let request = build_request(origin, destination, profile, itinerary_index)?;
    Ok(backend.debug_features(&request).await?)
}
