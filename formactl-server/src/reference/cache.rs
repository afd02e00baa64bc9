//! Reference snapshot cache
//!
//! One process-wide entry: the last snapshot and the instant its fetch
//! started. Entry and timestamp live in one struct and are replaced with a
//! single write, so readers never see a payload from one refresh with the
//! timestamp of another.
//!
//! Refreshes are single-flight: requests that find the entry stale queue on
//! the refresh gate, and whoever gets in after a successful refresh reuses
//! that snapshot instead of reading the store again. Waiters that queued
//! behind a failed attempt get that attempt's error rather than starting
//! another refresh against a store that just failed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use crate::models::ReferenceSnapshot;

use super::aggregator::{fetch_snapshot, RefreshError};
use super::store::ReferenceStore;

/// Snapshot lifetime
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Snapshot returned by [`ReferenceCache::get`]
#[derive(Debug, Clone)]
pub struct CacheLookup {
    pub snapshot: Arc<ReferenceSnapshot>,
    /// False only when this call read the store itself
    pub cached: bool,
}

struct CacheEntry {
    snapshot: Arc<ReferenceSnapshot>,
    fetched_at: Instant,
}

#[derive(Default)]
struct CacheState {
    entry: Option<CacheEntry>,
    /// Bumped by `invalidate`; a refresh only installs if it is unchanged
    generation: u64,
}

pub struct ReferenceCache {
    state: RwLock<CacheState>,
    /// Holds the error of the last finished attempt, `None` after a success
    refresh_gate: Mutex<Option<Arc<RefreshError>>>,
    /// Finished refresh attempts, bumped under the gate
    attempts: AtomicU64,
    ttl: Duration,
    query_timeout: Duration,
}

impl ReferenceCache {
    pub fn new(ttl: Duration, query_timeout: Duration) -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
            refresh_gate: Mutex::new(None),
            attempts: AtomicU64::new(0),
            ttl,
            query_timeout,
        }
    }

    /// Return the cached snapshot, refreshing from `store` when it is
    /// missing or older than the TTL.
    ///
    /// A failed refresh returns the error and leaves the current entry
    /// exactly as it was.
    pub async fn get(&self, store: &dyn ReferenceStore) -> Result<CacheLookup, RefreshError> {
        if let Some(snapshot) = self.fresh().await {
            tracing::debug!("reference cache hit");
            return Ok(CacheLookup {
                snapshot,
                cached: true,
            });
        }

        let seen = self.attempts.load(Ordering::Acquire);
        let mut gate = self.refresh_gate.lock().await;

        // Someone else may have refreshed while we waited on the gate
        if let Some(snapshot) = self.fresh().await {
            tracing::debug!("reference cache filled by concurrent refresh");
            return Ok(CacheLookup {
                snapshot,
                cached: true,
            });
        }

        // An attempt finished while we waited and it failed: share its error
        if self.attempts.load(Ordering::Acquire) != seen {
            if let Some(err) = gate.as_ref() {
                tracing::debug!("sharing error of concurrent refresh");
                return Err(RefreshError::Shared(Arc::clone(err)));
            }
        }

        let generation = self.state.read().await.generation;
        let started = Instant::now();

        let outcome = fetch_snapshot(store, self.query_timeout).await;
        self.attempts.fetch_add(1, Ordering::Release);

        let snapshot = match outcome {
            Ok(snapshot) => {
                *gate = None;
                Arc::new(snapshot)
            }
            Err(e) => {
                tracing::warn!(
                    collection = %e.collection(),
                    error = %e,
                    "reference refresh failed, keeping previous entry"
                );
                let err = Arc::new(e);
                *gate = Some(Arc::clone(&err));
                return Err(RefreshError::Shared(err));
            }
        };

        let mut state = self.state.write().await;
        if state.generation == generation {
            state.entry = Some(CacheEntry {
                snapshot: Arc::clone(&snapshot),
                fetched_at: started,
            });
            tracing::info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "reference cache refreshed"
            );
        } else {
            tracing::debug!("cache invalidated during refresh, not installing snapshot");
        }

        Ok(CacheLookup {
            snapshot,
            cached: false,
        })
    }

    /// Drop the current entry; the next `get` reads the store.
    pub async fn invalidate(&self) {
        let mut state = self.state.write().await;
        state.entry = None;
        state.generation += 1;
        tracing::info!(generation = state.generation, "reference cache invalidated");
    }

    /// Age of the current entry, if any
    pub async fn age(&self) -> Option<Duration> {
        let state = self.state.read().await;
        state.entry.as_ref().map(|e| e.fetched_at.elapsed())
    }

    async fn fresh(&self) -> Option<Arc<ReferenceSnapshot>> {
        let state = self.state.read().await;
        state
            .entry
            .as_ref()
            .filter(|e| e.fetched_at.elapsed() < self.ttl)
            .map(|e| Arc::clone(&e.snapshot))
    }
}
