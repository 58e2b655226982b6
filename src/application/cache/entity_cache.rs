//! Generic read-through cache for identity entities.

use std::collections::HashMap;
use std::future::Future;

use parking_lot::RwLock;
use tracing::{debug, trace};

use super::stats::{CacheStats, Counters};
use crate::domain::entities::Entity;
use crate::domain::errors::{CacheError, CacheResult, ProviderError};

/// ID → entity map that fetches on miss.
///
/// The lock only guards map access; fetches run with no lock held, so a slow
/// lookup never blocks hits on other keys. Two concurrent misses for the same
/// ID both fetch and the later store wins.
#[derive(Debug)]
pub struct EntityCache<E: Entity> {
    entries: RwLock<HashMap<String, E>>,
    counters: Counters,
}

impl<E: Entity> EntityCache<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            counters: Counters::default(),
        }
    }

    /// Returns the cached entity for `id`, or awaits `fetch` and stores its
    /// result. Failures are returned with the kind and ID attached and are
    /// never stored.
    ///
    /// # Errors
    /// Returns [`CacheError::Provider`] when `fetch` fails.
    pub async fn get_or_fetch<F, Fut>(&self, id: &str, fetch: F) -> CacheResult<E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<E, ProviderError>>,
    {
        if let Some(entity) = self.peek(id) {
            self.counters.hit();
            trace!(kind = %E::KIND, id, "Entity cache hit");
            return Ok(entity);
        }

        self.counters.miss();
        trace!(kind = %E::KIND, id, "Entity cache miss");

        let entity = fetch().await.map_err(|source| {
            debug!(kind = %E::KIND, id, error = %source, "Entity fetch failed");
            CacheError::provider(E::KIND, id, source)
        })?;

        self.entries.write().insert(id.to_string(), entity.clone());
        debug!(kind = %E::KIND, id, "Stored entity");

        Ok(entity)
    }

    /// Removes the entry for `id`.
    ///
    /// # Errors
    /// Returns [`CacheError::Missing`] if `id` was not cached.
    pub fn invalidate(&self, id: &str) -> CacheResult<()> {
        if self.entries.write().remove(id).is_none() {
            return Err(CacheError::missing(E::KIND, id));
        }

        debug!(kind = %E::KIND, id, "Invalidated entity");
        Ok(())
    }

    /// Returns the cached entity without fetching or counting a lookup.
    #[must_use]
    pub fn peek(&self, id: &str) -> Option<E> {
        self.entries.read().get(id).cloned()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.read().contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.len())
    }
}

impl<E: Entity> Default for EntityCache<E> {
    fn default() -> Self {
        Self::new()
    }
}
