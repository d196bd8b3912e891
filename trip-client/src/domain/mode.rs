//! Travel mode enumerations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A road-network routing mode, as understood by the road router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteProfile {
    Driving,
    Cycling,
    Foot,
}

impl RouteProfile {
    /// All profiles, in the order the road router expects them.
    pub const ALL: [RouteProfile; 3] =
        [RouteProfile::Driving, RouteProfile::Cycling, RouteProfile::Foot];

    /// Wire name of the profile.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteProfile::Driving => "driving",
            RouteProfile::Cycling => "cycling",
            RouteProfile::Foot => "foot",
        }
    }
}

impl fmt::Display for RouteProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-selectable travel mode: the three road profiles plus transit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    Cycling,
    Foot,
    Transit,
}

impl TravelMode {
    /// The road profile backing this mode, or `None` for transit.
    pub fn profile(&self) -> Option<RouteProfile> {
        match self {
            TravelMode::Driving => Some(RouteProfile::Driving),
            TravelMode::Cycling => Some(RouteProfile::Cycling),
            TravelMode::Foot => Some(RouteProfile::Foot),
            TravelMode::Transit => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Cycling => "cycling",
            TravelMode::Foot => "foot",
            TravelMode::Transit => "transit",
        }
    }
}

impl From<RouteProfile> for TravelMode {
    fn from(profile: RouteProfile) -> Self {
        match profile {
            RouteProfile::Driving => TravelMode::Driving,
            RouteProfile::Cycling => TravelMode::Cycling,
            RouteProfile::Foot => TravelMode::Foot,
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mode label produced by the mode-choice predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictedMode {
    Walk,
    Cycle,
    Pt,
    Drive,
}

impl PredictedMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictedMode::Walk => "walk",
            PredictedMode::Cycle => "cycle",
            PredictedMode::Pt => "pt",
            PredictedMode::Drive => "drive",
        }
    }
}

impl fmt::Display for PredictedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
