//! Inbound message events and their resolved form.

use serde::{Deserialize, Serialize};

use super::{Attachment, AttachmentDescriptor, Channel, Guild, User};

/// A message-create event as delivered by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEvent {
    pub id: String,
    pub channel_id: String,
    /// Absent for direct messages.
    #[serde(default)]
    pub guild_id: Option<String>,
    pub author: User,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<AttachmentDescriptor>,
}

/// A message event with its channel, guild and attachment content looked up.
#[derive(Debug, Clone)]
pub struct ResolvedMessage {
    pub event: MessageEvent,
    pub channel: Channel,
    pub guild: Option<Guild>,
    /// Successfully downloaded attachments, in event order.
    pub downloads: Vec<Attachment>,
}

impl ResolvedMessage {
    /// Channel name, prefixed the way sinks print it.
    #[must_use]
    pub fn channel_label(&self) -> String {
        format!("#{}", self.channel.name())
    }

    /// Guild name, or `"Direct Messages"` outside a guild.
    #[must_use]
    pub fn guild_label(&self) -> &str {
        self.guild.as_ref().map_or("Direct Messages", Guild::name)
    }
}
