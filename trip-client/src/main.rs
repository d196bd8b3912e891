use tracing_subscriber::EnvFilter;

use trip_client::backend::{BackendClient, BackendConfig};
use trip_client::domain::{GeoPoint, RouteProfile, TravelMode};
use trip_client::session::{PlannerSession, SessionEvent};

/// Demo trip across the city the backend's fixtures cover.
const ORIGIN: (f64, f64) = (39.87029, -4.03434);
const DESTINATION: (f64, f64) = (39.85968, -4.00525);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let base_url = std::env::var("TRIP_BACKEND_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
    println!("Trip planner demo against {base_url}");

    let config = BackendConfig::new().with_base_url(base_url.as_str());
    let client = BackendClient::new(config).expect("Failed to create backend client");

    let origin = GeoPoint::new(ORIGIN.0, ORIGIN.1).expect("valid origin");
    let destination = GeoPoint::new(DESTINATION.0, DESTINATION.1).expect("valid destination");
    let mut session = PlannerSession::new(client, origin, destination);

    println!("Trip: {origin} -> {destination}");
    println!();

    session
        .compute_all()
        .await
        .expect("endpoints are set at construction");

    match session.comparison().roads() {
        Some(roads) => {
            println!("Road routes:");
            for profile in RouteProfile::ALL {
                let route = roads.get(profile);
                println!(
                    "  {:<8} {:>7.1} km  {:>5.1} min",
                    profile.as_str(),
                    route.distance_m / 1000.0,
                    route.duration_s / 60.0,
                );
            }
        }
        None => {
            let reason = session.comparison().road_error().unwrap_or("no response");
            println!("Road routes unavailable: {reason}");
        }
    }

    match session.transit_itinerary() {
        Some(itinerary) => {
            println!(
                "Transit:  {:>7.1} km  {:>5.1} min  (alternative {} of {})",
                itinerary.distance_m / 1000.0,
                itinerary.duration_s / 60.0,
                itinerary.itinerary_index + 1,
                itinerary.total_itineraries,
            );
            for segment in &itinerary.segments {
                let line = segment.line.as_ref().map(|l| l.label()).unwrap_or("-");
                println!(
                    "    {:<6} {:<6} {:>5.1} min",
                    segment.mode,
                    line,
                    segment.duration_s / 60.0,
                );
            }
        }
        None => {
            let reason = session.comparison().transit_error().unwrap_or("no response");
            println!("Transit unavailable: {reason}");
        }
    }
    println!();

    // Page to the second alternative when there is one.
    if session.pager().total().is_some_and(|t| t > 1) {
        match session.next_itinerary().await {
            Ok(index) => {
                if let Some(itinerary) = session.transit_itinerary() {
                    println!(
                        "Alternative {}: {:.1} min",
                        index + 1,
                        itinerary.duration_s / 60.0,
                    );
                }
            }
            Err(e) => println!("Could not page to the next alternative: {e}"),
        }
        let _ = session.apply(SessionEvent::ModeSelected(TravelMode::Transit));
    }

    match session.lines().await {
        Ok(lines) => println!("Transit network: {} lines", lines.len()),
        Err(e) => println!("Could not load transit lines: {e}"),
    }
    println!();

    match session.predict().await {
        Ok(prediction) => {
            println!(
                "Predicted mode for the default rider: {} ({:.0}% confident)",
                prediction.predicted_mode,
                prediction.confidence * 100.0,
            );
            let mut probabilities: Vec<_> = prediction.probabilities.iter().collect();
            probabilities.sort_by(|a, b| b.1.total_cmp(a.1));
            for (mode, p) in probabilities {
                println!("  {:<6} {:>5.1}%", mode.as_str(), p * 100.0);
            }
        }
        Err(e) => println!("Prediction failed: {e}"),
    }
}
