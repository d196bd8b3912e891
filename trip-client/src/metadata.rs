//! Read-through cache for transit reference data.
//!
//! Stops and lines are relatively static: each list is fetched once and
//! shared for the process lifetime, invalidated only by explicit refresh.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::backend::{BackendError, RoutingBackend};
use crate::domain::{TransitLine, TransitStop};

/// Default cap on the number of stops fetched.
const DEFAULT_STOPS_LIMIT: u32 = 500;

/// Fetch-once cache of the transit stop and line lists.
#[derive(Debug)]
pub struct MetadataCache {
    stops: RwLock<Option<Arc<Vec<TransitStop>>>>,
    lines: RwLock<Option<Arc<Vec<TransitLine>>>>,
    stops_limit: u32,
}

impl MetadataCache {
    pub fn new(stops_limit: u32) -> Self {
        Self {
            stops: RwLock::new(None),
            lines: RwLock::new(None),
            stops_limit,
        }
    }

    /// All transit stops, fetching on first use.
    pub async fn stops<B: RoutingBackend>(
        &self,
        backend: &B,
    ) -> Result<Arc<Vec<TransitStop>>, BackendError> {
        if let Some(cached) = self.stops.read().await.clone() {
            return Ok(cached);
        }

        let stops = Arc::new(backend.stops(self.stops_limit).await?);
        debug!(count = stops.len(), "loaded transit stops");
        *self.stops.write().await = Some(stops.clone());
        Ok(stops)
    }

    /// All transit lines, fetching on first use.
    pub async fn lines<B: RoutingBackend>(
        &self,
        backend: &B,
    ) -> Result<Arc<Vec<TransitLine>>, BackendError> {
        if let Some(cached) = self.lines.read().await.clone() {
            return Ok(cached);
        }

        let lines = Arc::new(backend.lines().await?);
        debug!(count = lines.len(), "loaded transit lines");
        *self.lines.write().await = Some(lines.clone());
        Ok(lines)
    }

    /// Re-fetch the stop list. On failure the cached list is preserved.
    pub async fn refresh_stops<B: RoutingBackend>(
        &self,
        backend: &B,
    ) -> Result<usize, BackendError> {
        let stops = Arc::new(backend.stops(self.stops_limit).await?);
        let count = stops.len();
        *self.stops.write().await = Some(stops);
        Ok(count)
    }

    /// Re-fetch the line list. On failure the cached list is preserved.
    pub async fn refresh_lines<B: RoutingBackend>(
        &self,
        backend: &B,
    ) -> Result<usize, BackendError> {
        let lines = Arc::new(backend.lines().await?);
        let count = lines.len();
        *self.lines.write().await = Some(lines);
        Ok(count)
    }

    /// Drop both cached lists; the next read re-fetches.
    pub async fn invalidate(&self) {
        *self.stops.write().await = None;
        *self.lines.write().await = None;
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new(DEFAULT_STOPS_LIMIT)
    }
}
