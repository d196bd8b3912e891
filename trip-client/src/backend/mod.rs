//! Backend access layer.
//!
//! `RoutingBackend` is the seam between the orchestration components and
//! the transport: the real HTTP client and the fixture-backed mock both
//! implement it, so every component above this module can be tested
//! without a network.

mod client;
mod config;
mod error;
mod mock;
mod types;

pub use client::BackendClient;
pub use config::BackendConfig;
pub use error::BackendError;
pub use mock::{CallCounts, MockBackend, sample_prediction};
pub use types::{
    DebugFeaturesResponse, PredictRequest, RoadRouteRequest, RoadRouteResponse,
    TransitRouteRequest, TransitRouteResponse,
};

use chrono::NaiveDate;

use crate::domain::{
    GeoPoint, LineSchedule, ModePrediction, TransitLine, TransitLineDetail, TransitStop,
};

/// The provider operations the orchestration layer consumes.
///
/// Each method corresponds to one independent backend operation; callers
/// may hold several in flight concurrently.
pub trait RoutingBackend {
    /// Road routes for all three profiles in one request.
    async fn road_routes(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<RoadRouteResponse, BackendError>;

    /// One transit itinerary; `itinerary_index` addresses the provider's
    /// duration-sorted alternatives, defaulting to its own pick.
    async fn transit_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        itinerary_index: Option<usize>,
    ) -> Result<TransitRouteResponse, BackendError>;

    /// All transit stops, up to `limit`.
    async fn stops(&self, limit: u32) -> Result<Vec<TransitStop>, BackendError>;

    /// All transit lines.
    async fn lines(&self) -> Result<Vec<TransitLine>, BackendError>;

    /// Shape and stop pattern for one line.
    async fn line_detail(&self, line_id: &str) -> Result<TransitLineDetail, BackendError>;

    /// A line's departures on one calendar date.
    async fn line_schedule(
        &self,
        line_id: &str,
        date: NaiveDate,
    ) -> Result<LineSchedule, BackendError>;

    /// Predicted travel mode for the given trip context.
    async fn predict(&self, request: &PredictRequest) -> Result<ModePrediction, BackendError>;

    /// Full feature vector behind a prediction, for diagnostics.
    async fn debug_features(
        &self,
        request: &PredictRequest,
    ) -> Result<DebugFeaturesResponse, BackendError>;
}
