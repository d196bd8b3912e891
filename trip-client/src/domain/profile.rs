//! Rider profile fed to the mode-choice predictor.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Trip purpose categories, using the model's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripPurpose {
    /// Business.
    B,
    /// Home-based education.
    HBE,
    /// Home-based other.
    HBO,
    /// Home-based work.
    HBW,
    /// Non-home-based other.
    NHBO,
}

impl fmt::Display for TripPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            TripPurpose::B => "B",
            TripPurpose::HBE => "HBE",
            TripPurpose::HBO => "HBO",
            TripPurpose::HBW => "HBW",
            TripPurpose::NHBO => "NHBO",
        };
        f.write_str(code)
    }
}

/// Household vehicle fuel type categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Average,
    Diesel,
    Hybrid,
    Petrol,
}

/// Error for a rider profile field outside the model's accepted range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("rider profile field {field} out of range: {value}")]
pub struct ProfileError {
    pub field: &'static str,
    pub value: f64,
}

/// The demographic and trip attributes the predictor consumes.
///
/// Fully user-editable; never overwritten by fetch results. Bounds follow
/// the predictor's training pipeline and are checked before each request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderProfile {
    pub purpose: TripPurpose,
    pub fueltype: FuelType,

    /// Day of week, 1 (Monday) through 7 (Sunday).
    pub day_of_week: u8,
    /// Departure time as a linear hour in [0, 24].
    pub start_time_linear: f64,
    pub age: u32,
    #[serde(with = "int_flag")]
    pub female: bool,
    #[serde(with = "int_flag")]
    pub driving_license: bool,
    /// Cars in the household, 0 through 3.
    pub car_ownership: u8,

    pub cost_transit: f64,
    pub cost_driving_total: f64,
}

impl Default for RiderProfile {
    fn default() -> Self {
        Self {
            purpose: TripPurpose::HBW,
            fueltype: FuelType::Average,
            day_of_week: 3,
            start_time_linear: 12.0,
            age: 35,
            female: false,
            driving_license: true,
            car_ownership: 1,
            cost_transit: 1.5,
            cost_driving_total: 3.0,
        }
    }
}

impl RiderProfile {
    /// Check every field against the model's accepted ranges.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if !(1..=7).contains(&self.day_of_week) {
            return Err(ProfileError {
                field: "day_of_week",
                value: f64::from(self.day_of_week),
            });
        }
        if !(0.0..=24.0).contains(&self.start_time_linear) {
            return Err(ProfileError {
                field: "start_time_linear",
                value: self.start_time_linear,
            });
        }
        if !(16..=100).contains(&self.age) {
            return Err(ProfileError {
                field: "age",
                value: f64::from(self.age),
            });
        }
        if self.car_ownership > 3 {
            return Err(ProfileError {
                field: "car_ownership",
                value: f64::from(self.car_ownership),
            });
        }
        if !self.cost_transit.is_finite() || self.cost_transit < 0.0 {
            return Err(ProfileError {
                field: "cost_transit",
                value: self.cost_transit,
            });
        }
        if !self.cost_driving_total.is_finite() || self.cost_driving_total < 0.0 {
            return Err(ProfileError {
                field: "cost_driving_total",
                value: self.cost_driving_total,
            });
        }
        Ok(())
    }
}

/// The predictor expects booleans as 0/1 integers on the wire.
mod int_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(serde::de::Error::custom(format!(
                "flag must be 0 or 1, got {other}"
            ))),
        }
    }
}
