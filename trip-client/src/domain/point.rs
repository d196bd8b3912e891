//! Geographic point type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing a point from non-finite coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidPoint {
    reason: &'static str,
}

/// A WGS84 coordinate pair in floating-point degrees.
///
/// Equality is by value. Coordinates are only required to be finite;
/// out-of-range values are accepted and left for the routing providers
/// to reject.
///
/// # Examples
///
/// ```
/// use trip_client::domain::GeoPoint;
///
/// let p = GeoPoint::new(39.87029, -4.03434).unwrap();
/// assert_eq!(p.lat, 39.87029);
///
/// assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Construct a point, rejecting NaN and infinite coordinates.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidPoint> {
        if !lat.is_finite() {
            return Err(InvalidPoint {
                reason: "latitude must be finite",
            });
        }
        if !lon.is_finite() {
            return Err(InvalidPoint {
                reason: "longitude must be finite",
            });
        }
        Ok(Self { lat, lon })
    }

    /// Whether both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lon)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any pair of finite floats constructs successfully.
        #[test]
        fn finite_always_constructs(lat in -1000.0f64..1000.0, lon in -1000.0f64..1000.0) {
            let p = GeoPoint::new(lat, lon).unwrap();
            prop_assert!(p.is_finite());
        }

        /// Serialization roundtrips exactly.
        #[test]
        fn serde_roundtrip(lat in -90.0f64..90.0, lon in -180.0f64..180.0) {
            let p = GeoPoint::new(lat, lon).unwrap();
            let json = serde_json::to_string(&p).unwrap();
            let back: GeoPoint = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, p);
        }
    }
}
