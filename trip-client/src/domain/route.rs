//! Road route results.

use serde::{Deserialize, Serialize};

use super::mode::RouteProfile;
use super::point::GeoPoint;

/// One computed road route for a single profile.
///
/// Produced atomically per request; the polyline runs origin to destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResult {
    pub profile: RouteProfile,
    pub distance_m: f64,
    pub duration_s: f64,
    pub geometry: Vec<GeoPoint>,
}

/// Error building a complete per-profile route table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteSetError {
    /// The response did not contain a result for every profile.
    #[error("road-route response is missing profile {0}")]
    MissingProfile(RouteProfile),

    /// The response contained the same profile more than once.
    #[error("road-route response contains profile {0} more than once")]
    DuplicateProfile(RouteProfile),

    /// A result carried a negative distance or duration.
    #[error("road-route result for {0} has a negative distance or duration")]
    NegativeMetric(RouteProfile),
}

/// A complete set of road routes: exactly one result per profile.
///
/// A road-route fetch is all-or-nothing — a profile is never silently
/// dropped, so this type only exists when all three are present.
#[derive(Debug, Clone)]
pub struct RouteSet {
    driving: RouteResult,
    cycling: RouteResult,
    foot: RouteResult,
}

impl RouteSet {
    /// Build a route set from a provider response, enforcing completeness.
    pub fn from_results(results: Vec<RouteResult>) -> Result<Self, RouteSetError> {
        let mut driving = None;
        let mut cycling = None;
        let mut foot = None;

        for result in results {
            if result.distance_m < 0.0 || result.duration_s < 0.0 {
                return Err(RouteSetError::NegativeMetric(result.profile));
            }
            let slot = match result.profile {
                RouteProfile::Driving => &mut driving,
                RouteProfile::Cycling => &mut cycling,
                RouteProfile::Foot => &mut foot,
            };
            if slot.is_some() {
                return Err(RouteSetError::DuplicateProfile(result.profile));
            }
            *slot = Some(result);
        }

        Ok(Self {
            driving: driving.ok_or(RouteSetError::MissingProfile(RouteProfile::Driving))?,
            cycling: cycling.ok_or(RouteSetError::MissingProfile(RouteProfile::Cycling))?,
            foot: foot.ok_or(RouteSetError::MissingProfile(RouteProfile::Foot))?,
        })
    }

    /// The result for a given profile.
    pub fn get(&self, profile: RouteProfile) -> &RouteResult {
        match profile {
            RouteProfile::Driving => &self.driving,
            RouteProfile::Cycling => &self.cycling,
            RouteProfile::Foot => &self.foot,
        }
    }

    /// Iterate the results in profile order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteResult> {
        RouteProfile::ALL.iter().map(|p| self.get(*p))
    }
}
