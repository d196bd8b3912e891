//! Route comparison controller.
//!
//! Owns the latest road-route table and transit itinerary for the current
//! endpoints, plus the active mode selection. Every network operation is
//! tagged with the parameter tuple that produced it; a response only
//! commits while its key is still the latest requested one, so an
//! in-flight response for an abandoned query can never overwrite newer
//! state.

use tracing::{debug, trace};

use crate::domain::{
    GeoPoint, RouteResult, RouteSet, SelectionError, TransitItinerary, TravelMode,
};

/// The (origin, destination) pair a request was issued for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripEndpoints {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
}

/// Key tagging a road-route request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadKey {
    endpoints: TripEndpoints,
}

/// Key tagging a transit itinerary request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitKey {
    endpoints: TripEndpoints,
    itinerary_index: usize,
}

impl TransitKey {
    /// The itinerary index this request asked for.
    pub fn itinerary_index(&self) -> usize {
        self.itinerary_index
    }
}

/// Outcome of offering a response to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// The response matched the latest requested key and was applied.
    Applied,
    /// The response was superseded and silently discarded.
    Stale,
}

/// Tracks road and transit results for one trip and the active selection.
#[derive(Debug, Default)]
pub struct RouteComparisonController {
    endpoints: Option<TripEndpoints>,

    /// Latest requested key per operation; `None` means any in-flight
    /// response has been logically cancelled.
    road_key: Option<RoadKey>,
    transit_key: Option<TransitKey>,

    /// Last successful results. Replaced wholesale, never mutated.
    roads: Option<RouteSet>,
    transit: Option<(TransitKey, TransitItinerary)>,

    road_error: Option<String>,
    transit_error: Option<String>,

    active: Option<TravelMode>,
}

impl RouteComparisonController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The endpoints requests are currently keyed to.
    pub fn endpoints(&self) -> Option<TripEndpoints> {
        self.endpoints
    }

    /// Adopt new endpoints, logically cancelling any in-flight road or
    /// transit request for the old ones.
    ///
    /// Returns whether the endpoints actually changed. Re-placing a point
    /// at its existing coordinates is a no-op: nothing is invalidated,
    /// and callers must not discard dependent state either.
    pub fn set_endpoints(&mut self, endpoints: TripEndpoints) -> bool {
        if self.endpoints == Some(endpoints) {
            return false;
        }
        debug!(
            origin = %endpoints.origin,
            destination = %endpoints.destination,
            "endpoints changed, invalidating in-flight requests"
        );
        self.endpoints = Some(endpoints);
        self.road_key = None;
        self.transit_key = None;
        true
    }

    /// Start a road-route request for the current endpoints.
    pub fn begin_road_request(&mut self) -> Result<RoadKey, SelectionError> {
        let endpoints = self.endpoints.ok_or(SelectionError::NoEndpoints)?;
        let key = RoadKey { endpoints };
        self.road_key = Some(key);
        Ok(key)
    }

    /// Start a transit itinerary request for the current endpoints and
    /// the given itinerary index.
    pub fn begin_transit_request(
        &mut self,
        itinerary_index: usize,
    ) -> Result<TransitKey, SelectionError> {
        let endpoints = self.endpoints.ok_or(SelectionError::NoEndpoints)?;
        let key = TransitKey {
            endpoints,
            itinerary_index,
        };
        self.transit_key = Some(key);
        Ok(key)
    }

    /// Offer a road-route response. Enforces profile completeness: a
    /// response missing any profile fails the whole operation and leaves
    /// the previous table untouched.
    pub fn commit_roads(&mut self, key: RoadKey, results: Vec<RouteResult>) -> Commit {
        if self.road_key != Some(key) {
            trace!("discarding stale road-route response");
            return Commit::Stale;
        }

        match RouteSet::from_results(results) {
            Ok(set) => {
                self.roads = Some(set);
                self.road_error = None;
            }
            Err(e) => {
                debug!(error = %e, "road-route response rejected");
                self.road_error = Some(e.to_string());
            }
        }
        Commit::Applied
    }

    /// Record a road-route failure. Previously successful results stay
    /// visible until overwritten.
    pub fn fail_roads(&mut self, key: RoadKey, message: impl Into<String>) -> Commit {
        if self.road_key != Some(key) {
            trace!("discarding stale road-route failure");
            return Commit::Stale;
        }
        self.road_error = Some(message.into());
        Commit::Applied
    }

    /// Offer a transit itinerary response.
    pub fn commit_transit(&mut self, key: TransitKey, itinerary: TransitItinerary) -> Commit {
        if self.transit_key != Some(key) {
            trace!("discarding stale transit response");
            return Commit::Stale;
        }
        self.transit = Some((key, itinerary));
        self.transit_error = None;
        Commit::Applied
    }

    /// Record a transit fetch failure.
    pub fn fail_transit(&mut self, key: TransitKey, message: impl Into<String>) -> Commit {
        if self.transit_key != Some(key) {
            trace!("discarding stale transit failure");
            return Commit::Stale;
        }
        self.transit_error = Some(message.into());
        Commit::Applied
    }

    /// Whether a transit itinerary exists for the *current* endpoints.
    ///
    /// An itinerary fetched for previous endpoints does not count, so the
    /// transit mode stays blocked after a point moves until a fresh fetch
    /// commits.
    pub fn transit_available(&self) -> bool {
        self.transit
            .as_ref()
            .is_some_and(|(key, _)| Some(key.endpoints) == self.endpoints)
    }

    /// The transit itinerary for the current endpoints, if fetched.
    pub fn transit(&self) -> Option<&TransitItinerary> {
        self.transit
            .as_ref()
            .filter(|(key, _)| Some(key.endpoints) == self.endpoints)
            .map(|(_, itinerary)| itinerary)
    }

    /// The latest successful road-route table, possibly from previous
    /// endpoints (kept until overwritten).
    pub fn roads(&self) -> Option<&RouteSet> {
        self.roads.as_ref()
    }

    pub fn road_error(&self) -> Option<&str> {
        self.road_error.as_deref()
    }

    pub fn transit_error(&self) -> Option<&str> {
        self.transit_error.as_deref()
    }

    /// Set the active selection used for rendering.
    ///
    /// Selecting transit is rejected while no itinerary exists for the
    /// current endpoints.
    pub fn select_mode(&mut self, mode: TravelMode) -> Result<(), SelectionError> {
        if mode == TravelMode::Transit && !self.transit_available() {
            return Err(SelectionError::TransitUnavailable);
        }
        self.active = Some(mode);
        Ok(())
    }

    /// The currently selected mode, if any.
    pub fn active_mode(&self) -> Option<TravelMode> {
        self.active
    }

    /// Geometry of the active selection; empty when nothing is available.
    pub fn active_geometry(&self) -> &[GeoPoint] {
        match self.active {
            None => &[],
            Some(TravelMode::Transit) => self
                .transit()
                .map(|itinerary| itinerary.geometry.as_slice())
                .unwrap_or(&[]),
            Some(mode) => {
                // Non-transit modes always map to a profile.
                let Some(profile) = mode.profile() else {
                    return &[];
                };
                self.roads
                    .as_ref()
                    .map(|set| set.get(profile).geometry.as_slice())
                    .unwrap_or(&[])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteProfile;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn endpoints_a() -> TripEndpoints {
        TripEndpoints {
            origin: point(39.87029, -4.03434),
            destination: point(39.85968, -4.00525),
        }
    }

    fn endpoints_b() -> TripEndpoints {
        TripEndpoints {
            origin: point(39.9, -4.1),
            destination: point(39.8, -4.0),
        }
    }

    fn route(profile: RouteProfile, marker: f64) -> RouteResult {
        RouteResult {
            profile,
            distance_m: marker,
            duration_s: marker / 10.0,
            geometry: vec![point(marker, marker), point(marker + 1.0, marker + 1.0)],
        }
    }

    fn full_results(marker: f64) -> Vec<RouteResult> {
        vec![
            route(RouteProfile::Driving, marker),
            route(RouteProfile::Cycling, marker + 100.0),
            route(RouteProfile::Foot, marker + 200.0),
        ]
    }

    fn itinerary(duration_s: f64) -> TransitItinerary {
        TransitItinerary {
            distance_m: 4000.0,
            duration_s,
            geometry: vec![point(1.0, 1.0), point(2.0, 2.0)],
            segments: Vec::new(),
            itinerary_index: 0,
            total_itineraries: 3,
        }
    }

    #[test]
    fn selecting_cycling_exposes_cycling_geometry() {
        let mut controller = RouteComparisonController::new();
        controller.set_endpoints(endpoints_a());

        let key = controller.begin_road_request().unwrap();
        assert_eq!(controller.commit_roads(key, full_results(3000.0)), Commit::Applied);

        controller.select_mode(TravelMode::Cycling).unwrap();

        let expected = controller
            .roads()
            .unwrap()
            .get(RouteProfile::Cycling)
            .geometry
            .clone();
        assert_eq!(controller.active_geometry(), expected.as_slice());
    }

    #[test]
    fn incomplete_road_response_fails_whole_operation() {
        let mut controller = RouteComparisonController::new();
        controller.set_endpoints(endpoints_a());

        let key = controller.begin_road_request().unwrap();
        controller.commit_roads(key, full_results(3000.0));

        // Second fetch drops a profile: error recorded, table untouched.
        let key = controller.begin_road_request().unwrap();
        let partial = vec![
            route(RouteProfile::Driving, 9000.0),
            route(RouteProfile::Cycling, 9100.0),
        ];
        assert_eq!(controller.commit_roads(key, partial), Commit::Applied);

        assert!(controller.road_error().unwrap().contains("foot"));
        assert_eq!(
            controller.roads().unwrap().get(RouteProfile::Driving).distance_m,
            3000.0
        );
    }

    #[test]
    fn stale_road_response_is_discarded() {
        let mut controller = RouteComparisonController::new();

        controller.set_endpoints(endpoints_a());
        let key_a = controller.begin_road_request().unwrap();

        // Endpoints change while A is in flight; B is requested and lands.
        controller.set_endpoints(endpoints_b());
        let key_b = controller.begin_road_request().unwrap();
        assert_eq!(controller.commit_roads(key_b, full_results(5000.0)), Commit::Applied);

        // A arrives late: silently dropped.
        assert_eq!(controller.commit_roads(key_a, full_results(1000.0)), Commit::Stale);
        assert_eq!(
            controller.roads().unwrap().get(RouteProfile::Driving).distance_m,
            5000.0
        );
    }

    #[test]
    fn stale_transit_response_is_discarded_across_indices() {
        let mut controller = RouteComparisonController::new();
        controller.set_endpoints(endpoints_a());

        let key_0 = controller.begin_transit_request(0).unwrap();
        let key_1 = controller.begin_transit_request(1).unwrap();

        assert_eq!(controller.commit_transit(key_1, itinerary(1200.0)), Commit::Applied);
        assert_eq!(controller.commit_transit(key_0, itinerary(900.0)), Commit::Stale);

        assert_eq!(controller.transit().unwrap().duration_s, 1200.0);
    }

    #[test]
    fn stale_failures_are_discarded_too() {
        let mut controller = RouteComparisonController::new();
        controller.set_endpoints(endpoints_a());

        let key_a = controller.begin_road_request().unwrap();
        controller.set_endpoints(endpoints_b());

        assert_eq!(controller.fail_roads(key_a, "timeout"), Commit::Stale);
        assert!(controller.road_error().is_none());
    }

    #[test]
    fn transit_selection_blocked_until_fetch() {
        let mut controller = RouteComparisonController::new();
        controller.set_endpoints(endpoints_a());

        assert_eq!(
            controller.select_mode(TravelMode::Transit),
            Err(SelectionError::TransitUnavailable)
        );

        let key = controller.begin_transit_request(0).unwrap();
        controller.commit_transit(key, itinerary(900.0));
        assert!(controller.select_mode(TravelMode::Transit).is_ok());
    }

    #[test]
    fn endpoint_change_disables_transit_again() {
        let mut controller = RouteComparisonController::new();
        controller.set_endpoints(endpoints_a());

        let key = controller.begin_transit_request(0).unwrap();
        controller.commit_transit(key, itinerary(900.0));
        controller.select_mode(TravelMode::Transit).unwrap();

        controller.set_endpoints(endpoints_b());

        // The stored itinerary belongs to the old endpoints: unavailable.
        assert!(!controller.transit_available());
        assert!(controller.transit().is_none());
        assert!(controller.active_geometry().is_empty());
        assert_eq!(
            controller.select_mode(TravelMode::Transit),
            Err(SelectionError::TransitUnavailable)
        );
    }

    #[test]
    fn failed_road_fetch_keeps_last_geometry() {
        let mut controller = RouteComparisonController::new();
        controller.set_endpoints(endpoints_a());

        let key = controller.begin_road_request().unwrap();
        controller.commit_roads(key, full_results(3000.0));
        controller.select_mode(TravelMode::Driving).unwrap();
        let before = controller.active_geometry().to_vec();

        controller.set_endpoints(endpoints_b());
        let key = controller.begin_road_request().unwrap();
        assert_eq!(controller.fail_roads(key, "router down"), Commit::Applied);

        assert_eq!(controller.road_error(), Some("router down"));
        assert_eq!(controller.active_geometry(), before.as_slice());
    }

    #[test]
    fn transit_error_is_isolated_from_road_results() {
        let mut controller = RouteComparisonController::new();
        controller.set_endpoints(endpoints_a());

        let road_key = controller.begin_road_request().unwrap();
        controller.commit_roads(road_key, full_results(3000.0));

        let transit_key = controller.begin_transit_request(0).unwrap();
        controller.fail_transit(transit_key, "planner unavailable");

        assert!(controller.transit_error().is_some());
        assert!(controller.road_error().is_none());
        assert!(controller.roads().is_some());
    }

    #[test]
    fn requests_require_endpoints() {
        let mut controller = RouteComparisonController::new();
        assert_eq!(
            controller.begin_road_request(),
            Err(SelectionError::NoEndpoints)
        );
        assert_eq!(
            controller.begin_transit_request(0),
            Err(SelectionError::NoEndpoints)
        );
    }

    #[test]
    fn unchanged_endpoints_do_not_invalidate() {
        let mut controller = RouteComparisonController::new();
        assert!(controller.set_endpoints(endpoints_a()));

        let key = controller.begin_transit_request(1).unwrap();
        controller.commit_transit(key, itinerary(1200.0));

        // Same coordinates again: reported as unchanged, itinerary intact.
        assert!(!controller.set_endpoints(endpoints_a()));
        assert!(controller.transit_available());

        // A late response for the still-current key is not stale.
        let key_again = controller.begin_transit_request(1).unwrap();
        assert_eq!(controller.commit_transit(key_again, itinerary(1200.0)), Commit::Applied);

        assert!(controller.set_endpoints(endpoints_b()));
        assert!(!controller.transit_available());
    }

    #[test]
    fn no_selection_means_empty_geometry() {
        let controller = RouteComparisonController::new();
        assert!(controller.active_geometry().is_empty());
        assert_eq!(controller.active_mode(), None);
    }
}
