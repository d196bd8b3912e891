//! HTTP client for the aggregation backend.
//!
//! One client covers all four provider families the backend fronts:
//! road routing, transit itinerary routing, transit reference data, and
//! the mode-choice predictor. Non-2xx responses become typed errors;
//! bodies that fail to parse keep a truncated copy for diagnostics.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::domain::{
    GeoPoint, LineSchedule, ModePrediction, TransitLine, TransitLineDetail, TransitStop,
};

use super::config::BackendConfig;
use super::error::BackendError;
use super::types::{
    DebugFeaturesResponse, PredictRequest, RoadRouteRequest, RoadRouteResponse,
    TransitRouteRequest, TransitRouteResponse,
};
use super::RoutingBackend;

/// Client for the aggregation backend's HTTP API.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    stops_limit: u32,
}

impl BackendClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            stops_limit: config.stops_limit,
        })
    }

    /// The stops limit this client was configured with.
    pub fn stops_limit(&self) -> u32 {
        self.stops_limit
    }

    /// Read a response: triage the status code, then parse the JSON body.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        not_found: &str,
    ) -> Result<T, BackendError> {
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound {
                what: not_found.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| BackendError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl RoutingBackend for BackendClient {
    async fn road_routes(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<RoadRouteResponse, BackendError> {
        let url = format!("{}/api/osrm/routes", self.base_url);
        let body = RoadRouteRequest::all_profiles(origin, destination);

        let response = self.http.post(&url).json(&body).send().await?;
        Self::read_json(response, "road route").await
    }

    async fn transit_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        itinerary_index: Option<usize>,
    ) -> Result<TransitRouteResponse, BackendError> {
        let url = format!("{}/api/otp/routes", self.base_url);
        let body = TransitRouteRequest {
            origin,
            destination,
            itinerary_index,
        };

        let response = self.http.post(&url).json(&body).send().await?;
        Self::read_json(response, "transit itinerary").await
    }

    async fn stops(&self, limit: u32) -> Result<Vec<TransitStop>, BackendError> {
        let url = format!("{}/api/gtfs/stops", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;
        Self::read_json(response, "transit stops").await
    }

    async fn lines(&self) -> Result<Vec<TransitLine>, BackendError> {
        let url = format!("{}/api/gtfs/routes", self.base_url);

        let response = self.http.get(&url).send().await?;
        Self::read_json(response, "transit lines").await
    }

    async fn line_detail(&self, line_id: &str) -> Result<TransitLineDetail, BackendError> {
        let url = format!("{}/api/gtfs/routes/{}", self.base_url, line_id);

        let response = self.http.get(&url).send().await?;
        Self::read_json(response, &format!("transit line {line_id}")).await
    }

    async fn line_schedule(
        &self,
        line_id: &str,
        date: NaiveDate,
    ) -> Result<LineSchedule, BackendError> {
        let url = format!("{}/api/gtfs/routes/{}/schedule", self.base_url, line_id);

        let response = self
            .http
            .get(&url)
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .send()
            .await?;
        Self::read_json(response, &format!("schedule for line {line_id}")).await
    }

    async fn predict(&self, request: &PredictRequest) -> Result<ModePrediction, BackendError> {
        let url = format!("{}/api/lpmc/predict", self.base_url);

        let response = self.http.post(&url).json(request).send().await?;
        Self::read_json(response, "mode prediction").await
    }

    async fn debug_features(
        &self,
        request: &PredictRequest,
    ) -> Result<DebugFeaturesResponse, BackendError> {
        let url = format!("{}/api/lpmc/debug-features", self.base_url);

        let response = self.http.post(&url).json(request).send().await?;
        Self::read_json(response, "prediction debug features").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let config = BackendConfig::new().with_base_url("http://localhost:8000");
        let client = BackendClient::new(config);
        assert!(client.is_ok());
        assert_eq!(client.unwrap().stops_limit(), 500);
    }

    // Endpoint behavior is covered against MockBackend; exercising the
    // real client needs a running backend and belongs in ignored
    // integration tests.
}
