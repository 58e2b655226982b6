//! Hit/miss accounting shared by the caches.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free hit and miss counters.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Counters {
    pub(crate) fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, size: usize) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        CacheStats { hits, misses, size }
    }
}

/// Statistics about one cache map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups answered from memory.
    pub hits: u64,
    /// Lookups that went to the remote side.
    pub misses: u64,
    /// Entries currently held.
    pub size: usize,
}

impl CacheStats {
    /// Hit rate as a percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            (self.hits as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries, {:.1}% hit rate ({} hits, {} misses)",
            self.size,
            self.hit_rate(),
            self.hits,
            self.misses
        )
    }
}

/// Statistics for every map behind the cache façade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheOverview {
    pub channels: CacheStats,
    pub users: CacheStats,
    pub guilds: CacheStats,
    pub attachments: CacheStats,
}

impl fmt::Display for CacheOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "channels:    {}", self.channels)?;
        writeln!(f, "users:       {}", self.users)?;
        writeln!(f, "guilds:      {}", self.guilds)?;
        write!(f, "attachments: {}", self.attachments)
    }
}
