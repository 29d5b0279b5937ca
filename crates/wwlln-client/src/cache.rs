//! In-memory TTL cache for the most recent strike snapshot.
//!
//! The entry sits behind an async mutex that stays locked for the whole
//! refresh, so callers that miss at the same time share one upstream fetch
//! (single-flight) instead of each hitting the feed.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use wwlln_core::StrikeSnapshot;

use crate::error::WwllnError;

struct CacheEntry {
    snapshot: Arc<StrikeSnapshot>,
    fetched_at: Instant,
}

pub(crate) struct SnapshotCache {
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl SnapshotCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub(crate) fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached snapshot if it is younger than the TTL, otherwise
    /// awaits `refresh` and stores its result.
    ///
    /// A failed refresh leaves the previous entry in place and returns the
    /// error.
    pub(crate) async fn get_or_refresh<F, Fut>(
        &self,
        refresh: F,
    ) -> Result<Arc<StrikeSnapshot>, WwllnError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<StrikeSnapshot, WwllnError>>,
    {
        let mut entry = self.entry.lock().await;

        if let Some(cached) = entry.as_ref() {
            let age = cached.fetched_at.elapsed();
            if age < self.ttl {
                #[allow(clippy::cast_possible_truncation)]
                let age_ms = age.as_millis() as u64;
                tracing::debug!(age_ms, "strike cache hit");
                return Ok(Arc::clone(&cached.snapshot));
            }
        }

        tracing::debug!(stale = entry.is_some(), "strike cache miss, refreshing");
        let snapshot = Arc::new(refresh().await?);
        *entry = Some(CacheEntry {
            snapshot: Arc::clone(&snapshot),
            fetched_at: Instant::now(),
        });
        Ok(snapshot)
    }

    /// Drops the cached entry so the next read refetches.
    pub(crate) async fn invalidate(&self) {
        *self.entry.lock().await = None;
    }
}
