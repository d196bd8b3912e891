//! Origin/destination placement from map clicks.

use crate::domain::GeoPoint;

/// Which endpoint the next map click will place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementCursor {
    Origin,
    Destination,
}

impl PlacementCursor {
    fn flipped(self) -> Self {
        match self {
            PlacementCursor::Origin => PlacementCursor::Destination,
            PlacementCursor::Destination => PlacementCursor::Origin,
        }
    }
}

/// Owns the trip endpoints and the alternating placement cursor.
///
/// The first click places the origin, the second the destination, and so
/// on alternating. Observers must be told when either point moves so
/// dependent requests can be invalidated; [`handle_map_click`] reports
/// which endpoint changed for exactly that purpose.
///
/// [`handle_map_click`]: PointSelector::handle_map_click
#[derive(Debug, Clone)]
pub struct PointSelector {
    origin: GeoPoint,
    destination: GeoPoint,
    cursor: PlacementCursor,
}

impl PointSelector {
    /// Create a selector with initial endpoints; the next click places
    /// the origin.
    pub fn new(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            origin,
            destination,
            cursor: PlacementCursor::Origin,
        }
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    pub fn destination(&self) -> GeoPoint {
        self.destination
    }

    /// The endpoint the next click will place.
    pub fn cursor(&self) -> PlacementCursor {
        self.cursor
    }

    /// Place the clicked point at the cursor and flip the cursor.
    ///
    /// Returns which endpoint was replaced.
    pub fn handle_map_click(&mut self, point: GeoPoint) -> PlacementCursor {
        let placed = self.cursor;
        match placed {
            PlacementCursor::Origin => self.origin = point,
            PlacementCursor::Destination => self.destination = point,
        }
        self.cursor = self.cursor.flipped();
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn clicks_alternate_starting_with_origin() {
        let mut selector = PointSelector::new(point(0.0, 0.0), point(1.0, 1.0));

        assert_eq!(
            selector.handle_map_click(point(10.0, 10.0)),
            PlacementCursor::Origin
        );
        assert_eq!(selector.origin(), point(10.0, 10.0));
        assert_eq!(selector.destination(), point(1.0, 1.0));

        assert_eq!(
            selector.handle_map_click(point(20.0, 20.0)),
            PlacementCursor::Destination
        );
        assert_eq!(selector.destination(), point(20.0, 20.0));

        assert_eq!(
            selector.handle_map_click(point(30.0, 30.0)),
            PlacementCursor::Origin
        );
        assert_eq!(selector.origin(), point(30.0, 30.0));
    }

    #[test]
    fn cursor_reports_next_placement() {
        let mut selector = PointSelector::new(point(0.0, 0.0), point(1.0, 1.0));
        assert_eq!(selector.cursor(), PlacementCursor::Origin);
        selector.handle_map_click(point(2.0, 2.0));
        assert_eq!(selector.cursor(), PlacementCursor::Destination);
    }
}
