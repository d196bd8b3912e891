//! Mode-choice prediction results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::mode::PredictedMode;

/// Metadata describing the model artifact a prediction came from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub model_path: Option<String>,
    #[serde(default)]
    pub scaler_path: Option<String>,
    #[serde(default)]
    pub household_id_strategy: Option<String>,
    /// Which itinerary the service actually used for transit features.
    #[serde(default)]
    pub itinerary_index: Option<usize>,
    #[serde(default)]
    pub total_itineraries: Option<usize>,
}

/// A predicted travel mode with per-mode probabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModePrediction {
    pub predicted_mode: PredictedMode,
    /// Probability of the predicted mode, in [0, 1].
    pub confidence: f64,
    /// Probability per mode label; sums to ~1.
    pub probabilities: HashMap<PredictedMode, f64>,
    /// Derived per-mode durations and distances the model consumed.
    #[serde(default)]
    pub route_features: HashMap<String, f64>,
    #[serde(default)]
    pub model_info: ModelInfo,
}

impl ModePrediction {
    /// Sum of the per-mode probabilities.
    pub fn probability_sum(&self) -> f64 {
        self.probabilities.values().sum()
    }

    /// Whether the distribution sums to approximately one.
    pub fn is_normalized(&self) -> bool {
        (self.probability_sum() - 1.0).abs() < 1e-6
    }
}
