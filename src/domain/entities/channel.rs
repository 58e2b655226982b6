//! Discord channel entity.

use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};

/// Discord channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ChannelKind {
    /// Text channel.
    #[default]
    Text = 0,
    /// Direct message channel.
    Dm = 1,
    /// Voice channel.
    Voice = 2,
    /// Group direct message channel.
    GroupDm = 3,
    /// Category channel.
    Category = 4,
    /// Announcement channel.
    Announcement = 5,
    /// Announcement thread channel.
    AnnouncementThread = 10,
    /// Public thread channel.
    PublicThread = 11,
    /// Private thread channel.
    PrivateThread = 12,
    /// Stage voice channel.
    StageVoice = 13,
    /// Forum channel.
    Forum = 15,
}

impl ChannelKind {
    /// Returns true for channels outside any guild.
    #[must_use]
    pub const fn is_private(self) -> bool {
        matches!(self, Self::Dm | Self::GroupDm)
    }
}

impl From<u8> for ChannelKind {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Dm,
            2 => Self::Voice,
            3 => Self::GroupDm,
            4 => Self::Category,
            5 => Self::Announcement,
            10 => Self::AnnouncementThread,
            11 => Self::PublicThread,
            12 => Self::PrivateThread,
            13 => Self::StageVoice,
            15 => Self::Forum,
            _ => Self::Text,
        }
    }
}

/// Discord channel information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    id: String,
    guild_id: Option<String>,
    name: String,
    kind: ChannelKind,
    topic: Option<String>,
}

impl Channel {
    /// Creates a new channel with the given ID, name, and type.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ChannelKind) -> Self {
        Self {
            id: id.into(),
            guild_id: None,
            name: name.into(),
            kind,
            topic: None,
        }
    }

    /// Sets the guild ID for this channel.
    #[must_use]
    pub fn with_guild(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = Some(guild_id.into());
        self
    }

    /// Sets the topic for this channel.
    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Returns the ID of the guild this channel belongs to.
    #[must_use]
    pub fn guild_id(&self) -> Option<&str> {
        self.guild_id.as_deref()
    }

    /// Returns the channel name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the channel type.
    #[must_use]
    pub const fn kind(&self) -> ChannelKind {
        self.kind
    }

    /// Returns the channel topic.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }
}

impl Entity for Channel {
    const KIND: EntityKind = EntityKind::Channel;

    fn id(&self) -> &str {
        &self.id
    }
}
