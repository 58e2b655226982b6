//! Discord guild entity.

use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};

/// Discord guild (server) information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Guild {
    id: String,
    name: String,
    icon: Option<String>,
    owner_id: Option<String>,
}

impl Guild {
    /// Creates a new guild with the given ID and name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: None,
            owner_id: None,
        }
    }

    /// Sets the guild icon hash.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the owning user's ID.
    #[must_use]
    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    /// Returns the guild name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the guild icon hash.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Returns the owning user's ID.
    #[must_use]
    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }
}

impl Entity for Guild {
    const KIND: EntityKind = EntityKind::Guild;

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guild_creation() {
        let guild = Guild::new("9101112", "Testing Server").with_owner("5678");

        assert_eq!(guild.id(), "9101112");
        assert_eq!(guild.name(), "Testing Server");
        assert_eq!(guild.owner_id(), Some("5678"));
        assert!(guild.icon().is_none());
    }
}
