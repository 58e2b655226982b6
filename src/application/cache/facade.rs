//! Single handle over the identity and attachment caches.

use std::sync::Arc;

use tracing::info;

use super::attachment_cache::{AttachmentCache, CleanReport};
use super::config::CacheConfig;
use super::entity_cache::EntityCache;
use super::stats::CacheOverview;
use crate::domain::entities::{Attachment, AttachmentDescriptor, Channel, Guild, User};
use crate::domain::errors::CacheResult;
use crate::domain::ports::{AttachmentFetcher, Provider};

/// Read-through cache in front of the Discord API, used by event handlers.
///
/// Every map is independently locked, so the cache can be shared behind an
/// `Arc` between concurrently running handlers. Instances are independent of
/// each other.
pub struct Cache {
    provider: Arc<dyn Provider>,
    channels: EntityCache<Channel>,
    users: EntityCache<User>,
    guilds: EntityCache<Guild>,
    attachments: AttachmentCache,
    config: CacheConfig,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("config", &self.config)
            .field("channels", &self.channels.len())
            .field("users", &self.users.len())
            .field("guilds", &self.guilds.len())
            .field("attachments", &self.attachments.len())
            .finish_non_exhaustive()
    }
}

impl Cache {
    /// Creates a cache over `provider` for identities and `fetcher` for
    /// attachment content.
    #[must_use]
    pub fn new(
        provider: Arc<dyn Provider>,
        fetcher: Arc<dyn AttachmentFetcher>,
        config: CacheConfig,
    ) -> Self {
        info!(
            lifetime_secs = config.attachment_lifetime.as_secs(),
            prune_threshold = config.prune_threshold,
            "Cache initialized"
        );

        Self {
            provider,
            channels: EntityCache::new(),
            users: EntityCache::new(),
            guilds: EntityCache::new(),
            attachments: AttachmentCache::new(fetcher, &config),
            config,
        }
    }

    /// Looks up a channel, fetching it on first use.
    ///
    /// # Errors
    /// Returns error if the channel is not cached and the provider fails.
    pub async fn channel(&self, id: &str) -> CacheResult<Channel> {
        self.channels
            .get_or_fetch(id, || self.provider.fetch_channel(id))
            .await
    }

    /// Looks up a user, fetching it on first use.
    ///
    /// # Errors
    /// Returns error if the user is not cached and the provider fails.
    pub async fn user(&self, id: &str) -> CacheResult<User> {
        self.users
            .get_or_fetch(id, || self.provider.fetch_user(id))
            .await
    }

    /// Looks up a guild, fetching it on first use.
    ///
    /// # Errors
    /// Returns error if the guild is not cached and the provider fails.
    pub async fn guild(&self, id: &str) -> CacheResult<Guild> {
        self.guilds
            .get_or_fetch(id, || self.provider.fetch_guild(id))
            .await
    }

    /// Returns attachment content, downloading it on first use.
    ///
    /// # Errors
    /// Returns one of the three download error classes on failure.
    pub async fn attachment(&self, descriptor: &AttachmentDescriptor) -> CacheResult<Attachment> {
        self.attachments.get(descriptor).await
    }

    /// Drops a cached channel.
    ///
    /// # Errors
    /// Returns [`CacheError::Missing`](crate::domain::CacheError::Missing) if
    /// the channel was not cached.
    pub fn invalidate_channel(&self, id: &str) -> CacheResult<()> {
        self.channels.invalidate(id)
    }

    /// Drops a cached user.
    ///
    /// # Errors
    /// Returns [`CacheError::Missing`](crate::domain::CacheError::Missing) if
    /// the user was not cached.
    pub fn invalidate_user(&self, id: &str) -> CacheResult<()> {
        self.users.invalidate(id)
    }

    /// Drops a cached guild.
    ///
    /// # Errors
    /// Returns [`CacheError::Missing`](crate::domain::CacheError::Missing) if
    /// the guild was not cached.
    pub fn invalidate_guild(&self, id: &str) -> CacheResult<()> {
        self.guilds.invalidate(id)
    }

    /// Runs age and overflow eviction over the attachment map.
    pub fn clean_attachments(&self) -> CleanReport {
        self.attachments.clean()
    }

    /// Returns the configuration this cache was built with.
    #[must_use]
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns hit/miss statistics for every map.
    #[must_use]
    pub fn stats(&self) -> CacheOverview {
        CacheOverview {
            channels: self.channels.stats(),
            users: self.users.stats(),
            guilds: self.guilds.stats(),
            attachments: self.attachments.stats(),
        }
    }

    #[cfg(test)]
    pub(crate) const fn attachments(&self) -> &AttachmentCache {
        &self.attachments
    }
}
