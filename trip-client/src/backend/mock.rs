//! Mock backend for testing without live providers.
//!
//! Serves canned data configured programmatically or loaded from JSON
//! fixture files. Reproduces the transit provider's observable behavior:
//! itineraries are sorted by duration, the requested index is honored
//! when in range, and an out-of-range or absent index falls back to the
//! first alternative with a vehicle leg.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use chrono::NaiveDate;

use crate::domain::{
    GeoPoint, LineSchedule, ModePrediction, PredictedMode, RouteResult, TransitItinerary,
    TransitLine, TransitLineDetail, TransitStop,
};

use super::error::BackendError;
use super::types::{
    DebugFeaturesResponse, PredictRequest, RoadRouteResponse, TransitRouteResponse,
};
use super::RoutingBackend;

/// Per-operation request counters, for asserting fetch behavior in tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub road: usize,
    pub transit: usize,
    pub stops: usize,
    pub lines: usize,
    pub detail: usize,
    pub schedule: usize,
    pub predict: usize,
    pub debug: usize,
}

/// Mock implementation of [`RoutingBackend`].
pub struct MockBackend {
    roads: Vec<RouteResult>,
    itineraries: Vec<TransitItinerary>,
    stops: Vec<TransitStop>,
    lines: Vec<TransitLine>,
    details: HashMap<String, TransitLineDetail>,
    schedules: HashMap<(String, NaiveDate), LineSchedule>,
    prediction: Option<ModePrediction>,
    debug: Option<DebugFeaturesResponse>,

    road_failure: Mutex<Option<String>>,
    transit_failure: Mutex<Option<String>>,
    counts: Mutex<CallCounts>,
    last_predict_request: Mutex<Option<PredictRequest>>,
    last_transit_index: Mutex<Option<Option<usize>>>,
}

impl MockBackend {
    /// An empty mock; every operation fails with `NotFound` or returns nothing.
    pub fn new() -> Self {
        Self {
            roads: Vec::new(),
            itineraries: Vec::new(),
            stops: Vec::new(),
            lines: Vec::new(),
            details: HashMap::new(),
            schedules: HashMap::new(),
            prediction: None,
            debug: None,
            road_failure: Mutex::new(None),
            transit_failure: Mutex::new(None),
            counts: Mutex::new(CallCounts::default()),
            last_predict_request: Mutex::new(None),
            last_transit_index: Mutex::new(None),
        }
    }

    /// Load fixture files from a directory.
    ///
    /// Recognized files, each optional: `roads.json` (`Vec<RouteResult>`),
    /// `itineraries.json` (`Vec<TransitItinerary>`), `stops.json`
    /// (`Vec<TransitStop>`), `lines.json` (`Vec<TransitLine>`).
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, BackendError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(BackendError::NotFound {
                what: format!("fixture directory {}", dir.display()),
            });
        }

        let mut mock = Self::new();
        mock.roads = load_fixture(&dir.join("roads.json"))?.unwrap_or_default();
        mock.itineraries = load_fixture(&dir.join("itineraries.json"))?.unwrap_or_default();
        mock.stops = load_fixture(&dir.join("stops.json"))?.unwrap_or_default();
        mock.lines = load_fixture(&dir.join("lines.json"))?.unwrap_or_default();
        Ok(mock)
    }

    /// Set the road-route results (must cover the three profiles for a
    /// successful comparison).
    pub fn with_roads(mut self, roads: Vec<RouteResult>) -> Self {
        self.roads = roads;
        self
    }

    /// Set the transit itinerary alternatives.
    pub fn with_itineraries(mut self, itineraries: Vec<TransitItinerary>) -> Self {
        self.itineraries = itineraries;
        self
    }

    pub fn with_stops(mut self, stops: Vec<TransitStop>) -> Self {
        self.stops = stops;
        self
    }

    pub fn with_lines(mut self, lines: Vec<TransitLine>) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_line_detail(mut self, detail: TransitLineDetail) -> Self {
        self.details.insert(detail.line.id.clone(), detail);
        self
    }

    pub fn with_schedule(mut self, schedule: LineSchedule) -> Self {
        self.schedules
            .insert((schedule.line_id.clone(), schedule.date), schedule);
        self
    }

    pub fn with_prediction(mut self, prediction: ModePrediction) -> Self {
        self.prediction = Some(prediction);
        self
    }

    pub fn with_debug_features(mut self, debug: DebugFeaturesResponse) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Make subsequent road-route requests fail with an API error.
    pub fn fail_roads(&self, message: impl Into<String>) {
        *self.road_failure.lock().unwrap() = Some(message.into());
    }

    /// Clear an injected road-route failure.
    pub fn restore_roads(&self) {
        *self.road_failure.lock().unwrap() = None;
    }

    /// Make subsequent transit requests fail with an API error.
    pub fn fail_transit(&self, message: impl Into<String>) {
        *self.transit_failure.lock().unwrap() = Some(message.into());
    }

    pub fn restore_transit(&self) {
        *self.transit_failure.lock().unwrap() = None;
    }

    /// Snapshot of the per-operation call counts.
    pub fn counts(&self) -> CallCounts {
        *self.counts.lock().unwrap()
    }

    /// The body of the most recent predict/debug request, if any.
    pub fn last_predict_request(&self) -> Option<PredictRequest> {
        self.last_predict_request.lock().unwrap().clone()
    }

    /// The `itinerary_index` of the most recent transit request.
    pub fn last_transit_index(&self) -> Option<Option<usize>> {
        *self.last_transit_index.lock().unwrap()
    }

    /// Itineraries sorted by duration, the order indices address.
    fn sorted_itineraries(&self) -> Vec<TransitItinerary> {
        let mut sorted = self.itineraries.clone();
        sorted.sort_by(|a, b| a.duration_s.total_cmp(&b.duration_s));
        sorted
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn load_fixture<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, BackendError> {
    if !path.exists() {
        return Ok(None);
    }
    let json = std::fs::read_to_string(path).map_err(|e| BackendError::Api {
        status: 0,
        message: format!("failed to read {}: {e}", path.display()),
    })?;
    let value = serde_json::from_str(&json).map_err(|e| BackendError::Json {
        message: e.to_string(),
        body: Some(json.chars().take(500).collect()),
    })?;
    Ok(Some(value))
}

impl RoutingBackend for MockBackend {
    async fn road_routes(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<RoadRouteResponse, BackendError> {
        self.counts.lock().unwrap().road += 1;

        if let Some(message) = self.road_failure.lock().unwrap().clone() {
            return Err(BackendError::Api {
                status: 502,
                message,
            });
        }

        Ok(RoadRouteResponse {
            origin,
            destination,
            results: self.roads.clone(),
        })
    }

    async fn transit_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        itinerary_index: Option<usize>,
    ) -> Result<TransitRouteResponse, BackendError> {
        self.counts.lock().unwrap().transit += 1;
        *self.last_transit_index.lock().unwrap() = Some(itinerary_index);

        if let Some(message) = self.transit_failure.lock().unwrap().clone() {
            return Err(BackendError::Api {
                status: 502,
                message,
            });
        }

        let sorted = self.sorted_itineraries();
        if sorted.is_empty() {
            return Err(BackendError::NotFound {
                what: "transit itinerary".to_string(),
            });
        }

        let index = match itinerary_index {
            Some(i) if i < sorted.len() => i,
            // Out-of-range or absent: prefer the first alternative that
            // actually rides a vehicle.
            _ => sorted
                .iter()
                .position(|it| it.has_transit_leg())
                .unwrap_or(0),
        };

        let mut result = sorted[index].clone();
        result.itinerary_index = index;
        result.total_itineraries = sorted.len();

        Ok(TransitRouteResponse {
            origin,
            destination,
            result,
        })
    }

    async fn stops(&self, limit: u32) -> Result<Vec<TransitStop>, BackendError> {
        self.counts.lock().unwrap().stops += 1;
        Ok(self.stops.iter().take(limit as usize).cloned().collect())
    }

    async fn lines(&self) -> Result<Vec<TransitLine>, BackendError> {
        self.counts.lock().unwrap().lines += 1;
        Ok(self.lines.clone())
    }

    async fn line_detail(&self, line_id: &str) -> Result<TransitLineDetail, BackendError> {
        self.counts.lock().unwrap().detail += 1;
        self.details
            .get(line_id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound {
                what: format!("transit line {line_id}"),
            })
    }

    async fn line_schedule(
        &self,
        line_id: &str,
        date: NaiveDate,
    ) -> Result<LineSchedule, BackendError> {
        self.counts.lock().unwrap().schedule += 1;
        self.schedules
            .get(&(line_id.to_string(), date))
            .cloned()
            .ok_or_else(|| BackendError::NotFound {
                what: format!("schedule for line {line_id} on {date}"),
            })
    }

    async fn predict(&self, request: &PredictRequest) -> Result<ModePrediction, BackendError> {
        self.counts.lock().unwrap().predict += 1;
        *self.last_predict_request.lock().unwrap() = Some(request.clone());
        self.prediction
            .clone()
            .ok_or_else(|| BackendError::NotFound {
                what: "mode prediction".to_string(),
            })
    }

    async fn debug_features(
        &self,
        request: &PredictRequest,
    ) -> Result<DebugFeaturesResponse, BackendError> {
        self.counts.lock().unwrap().debug += 1;
        *self.last_predict_request.lock().unwrap() = Some(request.clone());
        self.debug.clone().ok_or_else(|| BackendError::NotFound {
            what: "prediction debug features".to_string(),
        })
    }
}

/// A canned prediction usable as a fixture default.
pub fn sample_prediction(mode: PredictedMode, confidence: f64) -> ModePrediction {
    let mut probabilities = HashMap::new();
    let rest = (1.0 - confidence) / 3.0;
    for candidate in [
        PredictedMode::Walk,
        PredictedMode::Cycle,
        PredictedMode::Pt,
        PredictedMode::Drive,
    ] {
        let p = if candidate == mode { confidence } else { rest };
        probabilities.insert(candidate, p);
    }

    ModePrediction {
        predicted_mode: mode,
        confidence,
        probabilities,
        route_features: HashMap::new(),
        model_info: Default::default(),
    }
}
