//! Attachment content cache with age and overflow eviction.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use tracing::{debug, info, trace};

use super::config::CacheConfig;
use super::stats::{CacheStats, Counters};
use crate::domain::entities::{Attachment, AttachmentDescriptor, AttachmentMeta};
use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::ports::AttachmentFetcher;

/// Outcome of a single [`AttachmentCache::clean`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanReport {
    /// Entries removed by the age pass.
    pub expired: usize,
    /// Entries removed by the overflow pass.
    pub pruned: usize,
    /// Entries left afterwards.
    pub remaining: usize,
}

impl CleanReport {
    /// Total number of entries removed.
    #[must_use]
    pub const fn removed(&self) -> usize {
        self.expired + self.pruned
    }
}

/// URL → attachment map, read-through over an [`AttachmentFetcher`].
pub struct AttachmentCache {
    fetcher: Arc<dyn AttachmentFetcher>,
    entries: Mutex<HashMap<String, Attachment>>,
    lifetime: Duration,
    prune_threshold: usize,
    clean_on_write: bool,
    counters: Counters,
}

impl std::fmt::Debug for AttachmentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachmentCache")
            .field("lifetime", &self.lifetime)
            .field("prune_threshold", &self.prune_threshold)
            .field("clean_on_write", &self.clean_on_write)
            .finish_non_exhaustive()
    }
}

impl AttachmentCache {
    #[must_use]
    pub fn new(fetcher: Arc<dyn AttachmentFetcher>, config: &CacheConfig) -> Self {
        Self {
            fetcher,
            entries: Mutex::new(HashMap::new()),
            lifetime: config.attachment_lifetime,
            prune_threshold: config.prune_threshold,
            clean_on_write: config.clean_on_write,
            counters: Counters::default(),
        }
    }

    /// Returns the attachment behind `descriptor.url`, downloading it on a miss.
    ///
    /// A hit refreshes the entry's last reference time. When the descriptor
    /// carries no content type, the response `Content-Type` is used instead.
    ///
    /// # Errors
    /// Returns [`CacheError::Request`], [`CacheError::FetchFailed`] or
    /// [`CacheError::Io`] depending on where the download failed. Nothing is
    /// cached on failure.
    pub async fn get(&self, descriptor: &AttachmentDescriptor) -> CacheResult<Attachment> {
        let url = descriptor.url.as_str();

        if let Some(attachment) = self.touch(url) {
            self.counters.hit();
            trace!(url, "Attachment cache hit");
            return Ok(attachment);
        }

        self.counters.miss();
        debug!(url, "Downloading attachment");

        let fetched = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|e| CacheError::download(url, AttachmentMeta::from(descriptor), e))?;

        let content_type = if descriptor.content_type.is_empty() {
            fetched.content_type.unwrap_or_default()
        } else {
            descriptor.content_type.clone()
        };

        let attachment = Attachment::new(
            descriptor.filename.clone(),
            content_type,
            fetched.body,
            Utc::now(),
        );

        self.entries
            .lock()
            .insert(url.to_string(), attachment.clone());
        debug!(url, size = attachment.len(), "Stored attachment");

        if self.clean_on_write {
            self.clean();
        }

        Ok(attachment)
    }

    /// Applies age eviction, then overflow eviction.
    ///
    /// Entries last referenced more than the configured lifetime ago are
    /// removed; future-dated entries never age out. If the map still holds
    /// more than the prune threshold, the least recently referenced entries
    /// go first, ties broken by URL.
    pub fn clean(&self) -> CleanReport {
        let now = Utc::now();
        let mut entries = self.entries.lock();

        let before = entries.len();
        if let Some(cutoff) = self.cutoff(now) {
            entries.retain(|_, attachment| attachment.last_reference() >= cutoff);
        }
        let expired = before - entries.len();

        let mut pruned = 0;
        if entries.len() > self.prune_threshold {
            let excess = entries.len() - self.prune_threshold;

            let mut by_age: Vec<(DateTime<Utc>, String)> = entries
                .iter()
                .map(|(url, attachment)| (attachment.last_reference(), url.clone()))
                .collect();
            by_age.sort_unstable();

            for (_, url) in by_age.into_iter().take(excess) {
                entries.remove(&url);
            }
            pruned = excess;
        }

        let report = CleanReport {
            expired,
            pruned,
            remaining: entries.len(),
        };
        drop(entries);

        if report.removed() > 0 {
            info!(
                expired = report.expired,
                pruned = report.pruned,
                remaining = report.remaining,
                "Cleaned attachment cache"
            );
        } else {
            trace!(remaining = report.remaining, "Attachment cache already clean");
        }

        report
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.entries.lock().contains_key(url)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.len())
    }

    /// Bumps the last reference of a cached entry and returns a copy.
    fn touch(&self, url: &str) -> Option<Attachment> {
        let mut entries = self.entries.lock();
        let attachment = entries.get_mut(url)?;
        attachment.touch(Utc::now());
        Some(attachment.clone())
    }

    /// Oldest last-reference time that survives the age pass. `None` when the
    /// lifetime reaches past the representable range, so nothing expires.
    fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let lifetime = TimeDelta::from_std(self.lifetime).ok()?;
        now.checked_sub_signed(lifetime)
    }

    #[cfg(test)]
    pub(crate) fn seed(&self, url: &str, attachment: Attachment) {
        self.entries.lock().insert(url.to_string(), attachment);
    }

    #[cfg(test)]
    pub(crate) fn peek(&self, url: &str) -> Option<Attachment> {
        self.entries.lock().get(url).cloned()
    }
}
