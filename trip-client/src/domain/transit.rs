//! Transit itinerary and reference-data types.
//!
//! These map to the transit router and transit data store responses.
//! Optional fields are plentiful because the feeds omit what they do
//! not know rather than sending nulls.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::point::GeoPoint;

/// Leg mode string for walking segments.
pub const WALK_MODE: &str = "WALK";

/// Minimal reference to a transit line, as embedded in stops and segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitLineRef {
    pub id: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub long_name: Option<String>,
}

impl TransitLineRef {
    /// Best display label: short name, then long name, then the raw id.
    pub fn label(&self) -> &str {
        self.short_name
            .as_deref()
            .or(self.long_name.as_deref())
            .unwrap_or(&self.id)
    }
}

/// One contiguous leg of a transit itinerary in a single mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitSegment {
    /// "WALK" or a vehicle mode (BUS, RAIL, SUBWAY, TRAM, ...).
    pub mode: String,
    pub distance_m: f64,
    pub duration_s: f64,
    pub geometry: Vec<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<TransitLineRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_stop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_stop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<String>,
}

impl TransitSegment {
    /// Whether this leg is walked rather than ridden.
    pub fn is_walk(&self) -> bool {
        self.mode == WALK_MODE
    }
}

/// One complete transit trip plan among the provider's alternatives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitItinerary {
    pub distance_m: f64,
    pub duration_s: f64,
    /// Full polyline, origin to destination, across all legs.
    pub geometry: Vec<GeoPoint>,
    pub segments: Vec<TransitSegment>,
    /// 0-based position of this itinerary in the provider's duration-sorted list.
    pub itinerary_index: usize,
    /// How many alternatives the provider found for this query.
    pub total_itineraries: usize,
}

impl TransitItinerary {
    /// Whether the provider-reported index sits inside the reported total.
    pub fn index_in_bounds(&self) -> bool {
        self.itinerary_index < self.total_itineraries
    }

    /// Whether any leg is a vehicle leg.
    pub fn has_transit_leg(&self) -> bool {
        self.segments.iter().any(|s| !s.is_walk())
    }
}

/// A named public-transit service (bus/rail line).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitLine {
    pub id: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// GTFS route_type code.
    #[serde(default)]
    pub route_type: Option<i32>,
    #[serde(default)]
    pub agency_id: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
}

/// A transit stop, optionally annotated with the lines serving it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitStop {
    pub id: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub routes: Option<Vec<TransitLineRef>>,
}

/// A stop on a line together with its position in the stop pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineStop {
    pub sequence: u32,
    #[serde(flatten)]
    pub stop: TransitStop,
}

/// Full detail for one line: metadata, stop pattern, and optional shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitLineDetail {
    pub line: TransitLine,
    pub stops: Vec<LineStop>,
    #[serde(default)]
    pub shape: Option<Vec<GeoPoint>>,
}

/// Departures for one direction of a line on a given date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDirection {
    #[serde(default)]
    pub direction_id: Option<i32>,
    #[serde(default)]
    pub headsign: Option<String>,
    pub trip_count: u32,
    #[serde(default)]
    pub first_departure: Option<String>,
    #[serde(default)]
    pub last_departure: Option<String>,
    /// Times of day, "HH:MM:SS", in departure order.
    pub departures: Vec<String>,
}

/// A line's schedule on one calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSchedule {
    pub line_id: String,
    pub date: NaiveDate,
    pub directions: Vec<ScheduleDirection>,
}
