//! Itinerary pagination state.

use crate::domain::SelectionError;

/// Tracks the 0-based transit itinerary index against the provider's
/// reported total.
///
/// The pager only decides which index to request next; the caller issues
/// the fetch and feeds the provider's answer back via [`record_fetch`].
/// `total` comes exclusively from the last successful fetch, so after
/// [`reset`] paging is blocked until a new fetch completes.
///
/// [`record_fetch`]: TransitItineraryPager::record_fetch
/// [`reset`]: TransitItineraryPager::reset
#[derive(Debug, Clone, Default)]
pub struct TransitItineraryPager {
    index: usize,
    total: Option<usize>,
}

impl TransitItineraryPager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current 0-based itinerary index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Total itineraries from the last successful fetch, if any.
    pub fn total(&self) -> Option<usize> {
        self.total
    }

    /// Advance to the next itinerary; returns the index to re-fetch.
    pub fn next(&mut self) -> Result<usize, SelectionError> {
        match self.total {
            None | Some(0) => Err(SelectionError::NoItineraries),
            Some(total) if self.index + 1 < total => {
                self.index += 1;
                Ok(self.index)
            }
            Some(_) => Err(SelectionError::LastItinerary),
        }
    }

    /// Step back to the previous itinerary; returns the index to re-fetch.
    pub fn previous(&mut self) -> Result<usize, SelectionError> {
        match self.total {
            None | Some(0) => Err(SelectionError::NoItineraries),
            _ if self.index > 0 => {
                self.index -= 1;
                Ok(self.index)
            }
            _ => Err(SelectionError::FirstItinerary),
        }
    }

    /// Back to index 0 with no known total. Called whenever origin or
    /// destination changes so a stale index never carries across trips.
    pub fn reset(&mut self) {
        self.index = 0;
        self.total = None;
    }

    /// Record a successful fetch: adopt the provider's index and total.
    ///
    /// The provider may clamp a requested index; its answer is
    /// authoritative. The stored index is forced inside [0, total).
    pub fn record_fetch(&mut self, index: usize, total: usize) {
        self.total = Some(total);
        self.index = if total == 0 {
            0
        } else {
            index.min(total - 1)
        };
    }

    /// Record that the provider found no itineraries for this query.
    pub fn record_empty(&mut self) {
        self.index = 0;
        self.total = Some(0);
    }

    /// Invariant check: index within [0, total), or 0 when no itineraries.
    pub fn index_in_bounds(&self) -> bool {
        match self.total {
            None | Some(0) => self.index == 0,
            Some(total) => self.index < total,
        }
    }
}
