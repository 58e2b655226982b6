//! Resolves an inbound message event against the cache.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::application::cache::Cache;
use crate::domain::entities::{MessageEvent, ResolvedMessage};
use crate::domain::errors::CacheError;

/// Looks up everything a sink needs to mirror a message.
#[derive(Clone)]
pub struct ResolveMessageUseCase {
    cache: Arc<Cache>,
}

impl ResolveMessageUseCase {
    /// Creates new use case over a shared cache.
    #[must_use]
    pub const fn new(cache: Arc<Cache>) -> Self {
        Self { cache }
    }

    /// Resolves channel, guild and attachments for `event`.
    ///
    /// Channel and guild failures abort the event. Attachment failures are
    /// logged and the attachment is skipped.
    ///
    /// # Errors
    /// Returns error if the channel or guild cannot be looked up.
    pub async fn execute(&self, event: MessageEvent) -> Result<ResolvedMessage, CacheError> {
        let channel = self.cache.channel(&event.channel_id).await.map_err(|e| {
            warn!(message_id = %event.id, error = %e, "Invalid channel, dropping message");
            e
        })?;

        let guild = match event.guild_id.as_deref() {
            Some(guild_id) => Some(self.cache.guild(guild_id).await.map_err(|e| {
                warn!(message_id = %event.id, error = %e, "Invalid guild, dropping message");
                e
            })?),
            None => None,
        };

        let results = join_all(
            event
                .attachments
                .iter()
                .map(|descriptor| self.cache.attachment(descriptor)),
        )
        .await;

        let downloads = results
            .into_iter()
            .filter_map(|result| match result {
                Ok(attachment) => Some(attachment),
                Err(e) => {
                    warn!(message_id = %event.id, error = %e, "Attachment download failed, skipping");
                    None
                }
            })
            .collect::<Vec<_>>();

        debug!(
            message_id = %event.id,
            channel = %channel.name(),
            downloads = downloads.len(),
            "Resolved message"
        );

        Ok(ResolvedMessage {
            event,
            channel,
            guild,
            downloads,
        })
    }
}
