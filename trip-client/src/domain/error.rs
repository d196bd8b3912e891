//! Domain-level selection errors.
//!
//! These represent invalid user actions against the current state —
//! distinct from transport/API failures. They are reported, never thrown
//! across unrelated state.

/// An action that is invalid given the current selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// Transit mode chosen with no itinerary fetched for the current endpoints.
    #[error("no transit itinerary available for the current endpoints")]
    TransitUnavailable,

    /// Paging forward past the last itinerary.
    #[error("already at the last itinerary")]
    LastItinerary,

    /// Paging backward past the first itinerary.
    #[error("already at the first itinerary")]
    FirstItinerary,

    /// Paging with no itineraries fetched (or none found).
    #[error("no itineraries available")]
    NoItineraries,

    /// Detail or schedule lookup with no line selected.
    #[error("no transit line selected")]
    NoLineSelected,

    /// A fetch was requested before both endpoints were placed.
    #[error("origin and destination are not both set")]
    NoEndpoints,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            SelectionError::TransitUnavailable.to_string(),
            "no transit itinerary available for the current endpoints"
        );
        assert_eq!(
            SelectionError::LastItinerary.to_string(),
            "already at the last itinerary"
        );
        assert_eq!(
            SelectionError::NoLineSelected.to_string(),
            "no transit line selected"
        );
    }
}
