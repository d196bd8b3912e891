//! Per-line detail and schedule caches.
//!
//! Line shape/stop lists are date-invariant, so they are keyed by line id
//! alone. Schedules vary by service date and are keyed by (line id, date).
//! Entries are evicted only by TTL/capacity policy or explicit
//! invalidation.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache as MokaCache;

use crate::backend::{BackendError, RoutingBackend};
use crate::domain::{LineSchedule, TransitLineDetail};

/// Cache key for schedules: (line id, service date).
type ScheduleKey = (String, NaiveDate);

/// Configuration for the detail caches.
#[derive(Debug, Clone)]
pub struct DetailCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per cache.
    pub max_capacity: u64,
}

impl Default for DetailCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15 * 60),
            max_capacity: 256,
        }
    }
}

/// Cache-or-fetch resolver for line details and schedules.
pub struct TransitDetailResolver {
    details: MokaCache<String, Arc<TransitLineDetail>>,
    schedules: MokaCache<ScheduleKey, Arc<LineSchedule>>,
}

impl TransitDetailResolver {
    /// Create a resolver with the given cache configuration.
    pub fn new(config: &DetailCacheConfig) -> Self {
        let details = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let schedules = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { details, schedules }
    }

    /// Shape and stop pattern for a line, cached by line id.
    pub async fn line_detail<B: RoutingBackend>(
        &self,
        backend: &B,
        line_id: &str,
    ) -> Result<Arc<TransitLineDetail>, BackendError> {
        if let Some(cached) = self.details.get(line_id).await {
            return Ok(cached);
        }

        let detail = Arc::new(backend.line_detail(line_id).await?);
        self.details
            .insert(line_id.to_string(), detail.clone())
            .await;
        Ok(detail)
    }

    /// A line's schedule for a date, cached by (line id, date).
    ///
    /// A date change for the same line misses the cache and re-fetches;
    /// unrelated state changes never do.
    pub async fn schedule<B: RoutingBackend>(
        &self,
        backend: &B,
        line_id: &str,
        date: NaiveDate,
    ) -> Result<Arc<LineSchedule>, BackendError> {
        let key = (line_id.to_string(), date);
        if let Some(cached) = self.schedules.get(&key).await {
            return Ok(cached);
        }

        let schedule = Arc::new(backend.line_schedule(line_id, date).await?);
        self.schedules.insert(key, schedule.clone()).await;
        Ok(schedule)
    }

    /// Number of cached line details (for monitoring).
    pub fn detail_entry_count(&self) -> u64 {
        self.details.entry_count()
    }

    /// Number of cached schedules (for monitoring).
    pub fn schedule_entry_count(&self) -> u64 {
        self.schedules.entry_count()
    }

    /// Invalidate everything in both caches.
    pub fn invalidate_all(&self) {
        self.details.invalidate_all();
        self.schedules.invalidate_all();
    }
}

impl Default for TransitDetailResolver {
    fn default() -> Self {
        Self::new(&DetailCacheConfig::default())
    }
}
