//! Cache-aside resolution of a place name to its current local time
//!
//! The resolver checks the persistent timezone store first, and only on a miss
//! walks the lookup pipeline (geocode, then timezone by coordinates), writing
//! the result back to the store before formatting. It holds no cache state of
//! its own.

use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use crate::cache::{StoreError, TimezoneStore};
use crate::lookup::{Geocoder, TimeFormatter, TimezoneFinder};

/// Failure kinds surfaced by [`Resolver::resolve`]
///
/// Each represents bad input, an absent external fact, or a durability problem
/// the caller should see. None are retried automatically.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The query was empty or whitespace-only
    #[error("city or landmark argument required")]
    EmptyQuery,

    /// Geocoding produced no coordinates for the query
    #[error("could not geocode: {0}")]
    PlaceNotFound(String),

    /// No timezone is known for the geocoded coordinates
    #[error("could not resolve timezone: {0}")]
    TimezoneNotFound(String),

    /// The resolved timezone could not be rendered
    #[error("could not format time: {0}")]
    FormatFailed(String),

    /// The store could not persist the freshly resolved timezone
    ///
    /// This aborts the whole resolution: returning an answer that silently
    /// never got cached would break the durability guarantee across restarts.
    #[error("could not persist timezone cache: {0}")]
    CacheWriteFailed(#[from] StoreError),
}

/// A successful resolution
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The trimmed, human-readable query as entered
    pub query: String,
    /// The resolved IANA timezone identifier
    pub timezone: String,
    /// The rendered current-time string
    pub display: String,
    /// Whether the timezone came from the store rather than the lookup pipeline
    pub cached: bool,
}

/// Orchestrates store, geocoder, timezone finder, and formatter
///
/// The store is locked only for the brief `get`/`set` calls, never across the
/// network-bound collaborator calls.
pub struct Resolver<G, T, F> {
    store: Mutex<TimezoneStore>,
    geocoder: G,
    timezone_finder: T,
    formatter: F,
}

impl<G, T, F> Resolver<G, T, F>
where
    G: Geocoder,
    T: TimezoneFinder,
    F: TimeFormatter,
{
    pub fn new(store: TimezoneStore, geocoder: G, timezone_finder: T, formatter: F) -> Self {
        Self {
            store: Mutex::new(store),
            geocoder,
            timezone_finder,
            formatter,
        }
    }

    /// Resolves a place name to its current local time
    ///
    /// Empty and whitespace-only queries are rejected before the store or any
    /// collaborator is touched. The cache key is the trimmed, lowercased query;
    /// the geocoder receives the trimmed original. Two concurrent identical
    /// misses may both walk the pipeline; the final `set` is last-writer-wins
    /// and the collaborator calls are idempotent, so no per-key in-flight
    /// de-duplication is done.
    pub async fn resolve(&self, query: &str) -> Result<Resolution, ResolveError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(ResolveError::EmptyQuery);
        }
        let key = trimmed.to_lowercase();

        let hit = self.lock_store().get(&key);
        let (timezone, cached) = match hit {
            Some(tz) => (tz, true),
            None => {
                let coords = self
                    .geocoder
                    .geocode(trimmed)
                    .await
                    .map_err(|err| ResolveError::PlaceNotFound(err.to_string()))?;
                let tz = self
                    .timezone_finder
                    .lookup(coords)
                    .await
                    .map_err(|err| ResolveError::TimezoneNotFound(err.to_string()))?;
                self.lock_store().set(&key, &tz)?;
                (tz, false)
            }
        };

        let display = self
            .formatter
            .format(&timezone)
            .map_err(|err| ResolveError::FormatFailed(err.to_string()))?;

        Ok(Resolution {
            query: trimmed.to_string(),
            timezone,
            display,
            cached,
        })
    }

    /// Empties the store and removes its snapshot
    pub fn clear_cache(&self) -> Result<(), StoreError> {
        self.lock_store().clear()
    }

    fn lock_store(&self) -> MutexGuard<'_, TimezoneStore> {
        // Store operations either complete or fail without leaving partial
        // state, so a poisoned lock is still safe to reuse.
        self.store.lock().unwrap_or_else(|err| err.into_inner())
    }
}
