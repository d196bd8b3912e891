//! Domain types for the trip-comparison client.
//!
//! Value types are validated at construction where an invariant exists,
//! so downstream code can trust what it receives.

mod error;
mod mode;
mod point;
mod prediction;
mod profile;
mod route;
mod transit;

pub use error::SelectionError;
pub use mode::{PredictedMode, RouteProfile, TravelMode};
pub use point::{GeoPoint, InvalidPoint};
pub use prediction::{ModePrediction, ModelInfo};
pub use profile::{FuelType, ProfileError, RiderProfile, TripPurpose};
pub use route::{RouteResult, RouteSet, RouteSetError};
pub use transit::{
    LineSchedule, LineStop, ScheduleDirection, TransitItinerary, TransitLine, TransitLineDetail,
    TransitLineRef, TransitSegment, TransitStop, WALK_MODE,
};
