//! Planner session: the facade tying the interaction components together.
//!
//! A [`PlannerSession`] owns one backend plus the point selector, route
//! comparison controller, itinerary pager, metadata cache, detail
//! resolver, and rider profile. UI events come in through
//! [`PlannerSession::apply`]; network work happens in the async methods,
//! which commit results through the comparison controller's request keys
//! so a superseded response can never clobber newer state.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::backend::{BackendError, DebugFeaturesResponse, RoutingBackend};
use crate::comparison::{RouteComparisonController, TripEndpoints};
use crate::detail::TransitDetailResolver;
use crate::domain::{
    GeoPoint, LineSchedule, ModePrediction, ProfileError, RiderProfile, SelectionError,
    TransitItinerary, TransitLine, TransitLineDetail, TransitStop, TravelMode,
};
use crate::metadata::MetadataCache;
use crate::pager::TransitItineraryPager;
use crate::predictor::{self, PredictError};
use crate::selector::PointSelector;

/// Errors surfaced by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

impl From<PredictError> for SessionError {
    fn from(e: PredictError) -> Self {
        match e {
            PredictError::Profile(e) => SessionError::Profile(e),
            PredictError::Backend(e) => SessionError::Backend(e),
        }
    }
}

/// A UI interaction for [`PlannerSession::apply`].
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A map click placing the next endpoint.
    PointPlaced(GeoPoint),
    /// The user picked a mode tab.
    ModeSelected(TravelMode),
    /// The user picked (or cleared) a transit line in the browser panel.
    LineSelected(Option<String>),
    /// The rider profile form was edited.
    ProfileEdited(RiderProfile),
}

/// One interactive trip-planning session against a routing backend.
pub struct PlannerSession<B: RoutingBackend> {
    backend: B,
    selector: PointSelector,
    comparison: RouteComparisonController,
    pager: TransitItineraryPager,
    metadata: MetadataCache,
    resolver: TransitDetailResolver,
    rider: RiderProfile,
    selected_line: Option<String>,
    last_prediction: Option<ModePrediction>,
}

impl<B: RoutingBackend> PlannerSession<B> {
    /// Create a session with initial endpoints. Driving starts active,
    /// mirroring the mode tab default.
    pub fn new(backend: B, origin: GeoPoint, destination: GeoPoint) -> Self {
        let selector = PointSelector::new(origin, destination);
        let mut comparison = RouteComparisonController::new();
        comparison.set_endpoints(TripEndpoints {
            origin,
            destination,
        });
        // Only transit selection can be rejected.
        let _ = comparison.select_mode(TravelMode::Driving);

        Self {
            backend,
            selector,
            comparison,
            pager: TransitItineraryPager::new(),
            metadata: MetadataCache::default(),
            resolver: TransitDetailResolver::default(),
            rider: RiderProfile::default(),
            selected_line: None,
            last_prediction: None,
        }
    }

    /// Apply a UI event to the session state.
    ///
    /// Placing a point invalidates in-flight requests and resets the
    /// pager; the caller is expected to follow up with [`compute_all`].
    ///
    /// [`compute_all`]: PlannerSession::compute_all
    pub fn apply(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        match event {
            SessionEvent::PointPlaced(point) => {
                let placed = self.selector.handle_map_click(point);
                debug!(?placed, %point, "endpoint placed");
                let changed = self.comparison.set_endpoints(TripEndpoints {
                    origin: self.selector.origin(),
                    destination: self.selector.destination(),
                });
                // A click on the point's existing coordinates changes
                // nothing; the displayed itinerary and pager stay valid.
                if changed {
                    self.pager.reset();
                }
            }
            SessionEvent::ModeSelected(mode) => self.comparison.select_mode(mode)?,
            SessionEvent::LineSelected(line) => self.selected_line = line,
            SessionEvent::ProfileEdited(profile) => {
                profile.validate()?;
                self.rider = profile;
            }
        }
        Ok(())
    }

    /// Fetch road routes and the current transit itinerary concurrently.
    ///
    /// Per-mode failures are recorded in the comparison controller rather
    /// than returned, so one provider being down never hides the other's
    /// results. Errs only when no endpoints are set.
    pub async fn compute_all(&mut self) -> Result<(), SelectionError> {
        let road_key = self.comparison.begin_road_request()?;
        let index = self.pager.index();
        let transit_key = self.comparison.begin_transit_request(index)?;
        let origin = self.selector.origin();
        let destination = self.selector.destination();
        info!(%origin, %destination, index, "computing all routes");

        let (roads, transit) = futures::join!(
            self.backend.road_routes(origin, destination),
            self.backend.transit_route(origin, destination, Some(index)),
        );

        match roads {
            Ok(response) => {
                self.comparison.commit_roads(road_key, response.results);
            }
            Err(e) => {
                self.comparison.fail_roads(road_key, e.to_string());
            }
        }

        match transit {
            Ok(response) => {
                let itinerary = response.result;
                self.pager
                    .record_fetch(itinerary.itinerary_index, itinerary.total_itineraries);
                self.comparison.commit_transit(transit_key, itinerary);
            }
            Err(BackendError::NotFound { .. }) => {
                self.pager.record_empty();
                self.comparison
                    .fail_transit(transit_key, "no transit itineraries found");
            }
            Err(e) => {
                self.comparison.fail_transit(transit_key, e.to_string());
            }
        }

        Ok(())
    }

    /// Page to the next transit itinerary; returns the displayed index.
    pub async fn next_itinerary(&mut self) -> Result<usize, SessionError> {
        let index = self.pager.next()?;
        match self.fetch_itinerary_at(index).await {
            Ok(displayed) => Ok(displayed),
            Err(e) => {
                // Keep the displayed itinerary and index in step.
                let _ = self.pager.previous();
                Err(e)
            }
        }
    }

    /// Page to the previous transit itinerary; returns the displayed index.
    pub async fn previous_itinerary(&mut self) -> Result<usize, SessionError> {
        let index = self.pager.previous()?;
        match self.fetch_itinerary_at(index).await {
            Ok(displayed) => Ok(displayed),
            Err(e) => {
                let _ = self.pager.next();
                Err(e)
            }
        }
    }

    async fn fetch_itinerary_at(&mut self, index: usize) -> Result<usize, SessionError> {
        let key = self.comparison.begin_transit_request(index)?;
        let origin = self.selector.origin();
        let destination = self.selector.destination();

        match self
            .backend
            .transit_route(origin, destination, Some(index))
            .await
        {
            Ok(response) => {
                let itinerary = response.result;
                self.pager
                    .record_fetch(itinerary.itinerary_index, itinerary.total_itineraries);
                let displayed = itinerary.itinerary_index;
                self.comparison.commit_transit(key, itinerary);
                Ok(displayed)
            }
            Err(e) => {
                self.comparison.fail_transit(key, e.to_string());
                Err(e.into())
            }
        }
    }

    /// Predict the rider's mode choice for the current trip.
    ///
    /// The itinerary index is forwarded only while a transit itinerary
    /// for the current endpoints is on display, so the model scores the
    /// same alternative the user is looking at.
    pub async fn predict(&mut self) -> Result<ModePrediction, SessionError> {
        let prediction = predictor::predict(
            &self.backend,
            self.selector.origin(),
            self.selector.destination(),
            &self.rider,
            self.displayed_itinerary_index(),
        )
        .await?;
        info!(mode = ?prediction.predicted_mode, confidence = prediction.confidence, "mode predicted");
        self.last_prediction = Some(prediction.clone());
        Ok(prediction)
    }

    /// The full feature vector behind a prediction, for the debug panel.
    pub async fn prediction_debug(&self) -> Result<DebugFeaturesResponse, SessionError> {
        Ok(predictor::debug_features(
            &self.backend,
            self.selector.origin(),
            self.selector.destination(),
            &self.rider,
            self.displayed_itinerary_index(),
        )
        .await?)
    }

    fn displayed_itinerary_index(&self) -> Option<usize> {
        self.comparison
            .transit_available()
            .then(|| self.pager.index())
    }

    /// Transit stops for the map overlay, cached after the first fetch.
    pub async fn stops(&self) -> Result<Arc<Vec<TransitStop>>, SessionError> {
        Ok(self.metadata.stops(&self.backend).await?)
    }

    /// Transit lines for the browser panel, cached after the first fetch.
    pub async fn lines(&self) -> Result<Arc<Vec<TransitLine>>, SessionError> {
        Ok(self.metadata.lines(&self.backend).await?)
    }

    /// Detail for the selected line; errs when no line is selected.
    pub async fn line_detail(&self) -> Result<Arc<TransitLineDetail>, SessionError> {
        let line = self
            .selected_line
            .as_deref()
            .ok_or(SelectionError::NoLineSelected)?;
        Ok(self.resolver.line_detail(&self.backend, line).await?)
    }

    /// Schedule of the selected line for a date; errs when no line is
    /// selected.
    pub async fn schedule(&self, date: NaiveDate) -> Result<Arc<LineSchedule>, SessionError> {
        let line = self
            .selected_line
            .as_deref()
            .ok_or(SelectionError::NoLineSelected)?;
        Ok(self.resolver.schedule(&self.backend, line, date).await?)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn selector(&self) -> &PointSelector {
        &self.selector
    }

    pub fn comparison(&self) -> &RouteComparisonController {
        &self.comparison
    }

    pub fn pager(&self) -> &TransitItineraryPager {
        &self.pager
    }

    pub fn rider(&self) -> &RiderProfile {
        &self.rider
    }

    pub fn selected_line(&self) -> Option<&str> {
        self.selected_line.as_deref()
    }

    pub fn last_prediction(&self) -> Option<&ModePrediction> {
        self.last_prediction.as_ref()
    }

    /// The transit itinerary currently on display, if any.
    pub fn transit_itinerary(&self) -> Option<&TransitItinerary> {
        self.comparison.transit()
    }

    /// Geometry of the active mode, for rendering.
    pub fn active_geometry(&self) -> &[GeoPoint] {
        self.comparison.active_geometry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MockBackend, sample_prediction};
    use crate::domain::{
        PredictedMode, RouteProfile, RouteResult, TransitSegment,
    };

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn origin() -> GeoPoint {
        point(39.87029, -4.03434)
    }

    fn destination() -> GeoPoint {
        point(39.85968, -4.00525)
    }

    fn full_roads() -> Vec<RouteResult> {
        RouteProfile::ALL
            .iter()
            .enumerate()
            .map(|(i, profile)| RouteResult {
                profile: *profile,
                distance_m: 3000.0 + i as f64 * 100.0,
                duration_s: 300.0 + i as f64 * 60.0,
                geometry: vec![origin(), destination()],
            })
            .collect()
    }

    fn bus_itinerary(duration_s: f64) -> TransitItinerary {
        TransitItinerary {
            distance_m: 4000.0,
            duration_s,
            geometry: vec![origin(), destination()],
            segments: vec![TransitSegment {
                mode: "BUS".into(),
                distance_m: 4000.0,
                duration_s,
                geometry: vec![origin(), destination()],
                line: None,
                agency: None,
                from_stop: None,
                to_stop: None,
                departure: None,
                arrival: None,
            }],
            itinerary_index: 0,
            total_itineraries: 0,
        }
    }

    fn session_with_transit() -> PlannerSession<MockBackend> {
        let backend = MockBackend::new()
            .with_roads(full_roads())
            .with_itineraries(vec![
                bus_itinerary(900.0),
                bus_itinerary(1200.0),
                bus_itinerary(1500.0),
            ])
            .with_prediction(sample_prediction(PredictedMode::Pt, 0.7));
        PlannerSession::new(backend, origin(), destination())
    }

    #[tokio::test]
    async fn compute_all_fills_both_tables() {
        let mut session = session_with_transit();
        session.compute_all().await.unwrap();

        assert!(session.comparison().roads().is_some());
        assert!(session.comparison().transit_available());
        assert_eq!(session.pager().total(), Some(3));
        assert_eq!(session.pager().index(), 0);
        assert_eq!(session.transit_itinerary().unwrap().duration_s, 900.0);
    }

    #[tokio::test]
    async fn paging_refetches_with_each_index() {
        let mut session = session_with_transit();
        session.compute_all().await.unwrap();

        assert_eq!(session.next_itinerary().await.unwrap(), 1);
        assert_eq!(session.next_itinerary().await.unwrap(), 2);
        assert_eq!(session.previous_itinerary().await.unwrap(), 1);

        assert_eq!(session.pager().index(), 1);
        assert_eq!(session.transit_itinerary().unwrap().duration_s, 1200.0);
        // One initial fetch plus one per paging step.
        assert_eq!(session.backend().counts().transit, 4);
        assert_eq!(session.backend().last_transit_index(), Some(Some(1)));
    }

    #[tokio::test]
    async fn placing_a_point_disables_transit_until_refetch() {
        let mut session = session_with_transit();
        session.compute_all().await.unwrap();
        session
            .apply(SessionEvent::ModeSelected(TravelMode::Transit))
            .unwrap();

        session
            .apply(SessionEvent::PointPlaced(point(39.9, -4.1)))
            .unwrap();

        assert!(!session.comparison().transit_available());
        assert!(session.active_geometry().is_empty());
        // Pager was reset: paging is blocked until a new fetch lands.
        let err = session.next_itinerary().await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Selection(SelectionError::NoItineraries)
        ));

        session.compute_all().await.unwrap();
        assert!(session.comparison().transit_available());
        assert_eq!(session.pager().index(), 0);
    }

    #[tokio::test]
    async fn replaying_a_point_keeps_pager_and_prediction_in_step() {
        let mut session = session_with_transit();
        session.compute_all().await.unwrap();
        session.next_itinerary().await.unwrap();
        assert_eq!(session.pager().index(), 1);

        // Click the origin's existing coordinates: nothing changed.
        session
            .apply(SessionEvent::PointPlaced(origin()))
            .unwrap();

        assert!(session.comparison().transit_available());
        assert_eq!(session.pager().index(), 1);

        // The prediction still scores the itinerary on display.
        session.predict().await.unwrap();
        let sent = session.backend().last_predict_request().unwrap();
        assert_eq!(sent.itinerary_index, Some(1));

        // And paging picks up where the user left off.
        assert_eq!(session.next_itinerary().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn transit_mode_rejected_before_any_fetch() {
        let mut session = session_with_transit();
        let err = session
            .apply(SessionEvent::ModeSelected(TravelMode::Transit))
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Selection(SelectionError::TransitUnavailable)
        ));
        assert_eq!(session.comparison().active_mode(), Some(TravelMode::Driving));
    }

    #[tokio::test]
    async fn predict_forwards_displayed_index_only_when_transit_shown() {
        let mut session = session_with_transit();
        session.compute_all().await.unwrap();
        session.next_itinerary().await.unwrap();

        session.predict().await.unwrap();
        let sent = session.backend().last_predict_request().unwrap();
        assert_eq!(sent.itinerary_index, Some(1));

        // A moved point invalidates the itinerary; no index is sent.
        session
            .apply(SessionEvent::PointPlaced(point(39.9, -4.1)))
            .unwrap();
        session.predict().await.unwrap();
        let sent = session.backend().last_predict_request().unwrap();
        assert_eq!(sent.itinerary_index, None);
    }

    #[tokio::test]
    async fn failed_paging_fetch_rolls_the_index_back() {
        let mut session = session_with_transit();
        session.compute_all().await.unwrap();

        session.backend().fail_transit("planner down");
        let err = session.next_itinerary().await.unwrap_err();
        assert!(matches!(err, SessionError::Backend(_)));

        assert_eq!(session.pager().index(), 0);
        assert!(session.comparison().transit_error().is_some());
        // The previously fetched itinerary stays on display.
        assert!(session.comparison().transit_available());
    }

    #[tokio::test]
    async fn road_failure_is_recorded_not_returned() {
        let mut session = session_with_transit();
        session.backend().fail_roads("router down");

        session.compute_all().await.unwrap();

        assert!(session.comparison().road_error().is_some());
        // Transit still landed despite the road failure.
        assert!(session.comparison().transit_available());
    }

    #[tokio::test]
    async fn empty_transit_result_records_empty_pager() {
        let backend = MockBackend::new().with_roads(full_roads());
        let mut session = PlannerSession::new(backend, origin(), destination());

        session.compute_all().await.unwrap();

        assert_eq!(session.pager().total(), Some(0));
        assert!(!session.comparison().transit_available());
        assert!(session.comparison().transit_error().is_some());
        assert!(session.comparison().roads().is_some());
    }

    #[tokio::test]
    async fn line_detail_requires_a_selection() {
        let session = session_with_transit();
        let err = session.line_detail().await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Selection(SelectionError::NoLineSelected)
        ));
    }

    #[tokio::test]
    async fn invalid_profile_edit_is_rejected() {
        let mut session = session_with_transit();
        let mut profile = RiderProfile::default();
        profile.day_of_week = 9;

        let err = session
            .apply(SessionEvent::ProfileEdited(profile))
            .unwrap_err();
        assert!(matches!(err, SessionError::Profile(_)));
        assert_eq!(session.rider().day_of_week, RiderProfile::default().day_of_week);
    }

    #[tokio::test]
    async fn clicks_alternate_between_endpoints() {
        let mut session = session_with_transit();

        session
            .apply(SessionEvent::PointPlaced(point(40.0, -4.0)))
            .unwrap();
        assert_eq!(session.selector().origin(), point(40.0, -4.0));
        assert_eq!(session.selector().destination(), destination());

        session
            .apply(SessionEvent::PointPlaced(point(39.8, -4.2)))
            .unwrap();
        assert_eq!(session.selector().destination(), point(39.8, -4.2));
    }
}
