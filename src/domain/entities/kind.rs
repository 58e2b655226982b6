//! Entity kinds served by the identity caches.

use std::fmt;

/// The three identity entity kinds the relay looks up by ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Text, voice or DM channel.
    Channel,
    /// User account.
    User,
    /// Guild (server).
    Guild,
}

impl EntityKind {
    /// Returns the lowercase name used in log fields and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::User => "user",
            Self::Guild => "guild",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An identity entity that can be memoized by its platform-assigned ID.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Kind tag used for logging and error context.
    const KIND: EntityKind;

    /// Platform-assigned ID.
    fn id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(EntityKind::Channel.to_string(), "channel");
        assert_eq!(EntityKind::User.to_string(), "user");
        assert_eq!(EntityKind::Guild.to_string(), "guild");
    }
}
