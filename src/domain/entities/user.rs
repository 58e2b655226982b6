//! Discord user entity.

use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};

/// Discord user information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    id: String,
    username: String,
    #[serde(default)]
    discriminator: String,
    global_name: Option<String>,
    avatar: Option<String>,
    #[serde(default)]
    bot: bool,
}

impl User {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        discriminator: impl Into<String>,
        avatar: Option<String>,
        bot: bool,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            discriminator: discriminator.into(),
            global_name: None,
            avatar,
            bot,
        }
    }

    #[must_use]
    pub fn with_global_name(mut self, global_name: impl Into<String>) -> Self {
        self.global_name = Some(global_name.into());
        self
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    #[must_use]
    pub fn global_name(&self) -> Option<&str> {
        self.global_name.as_deref()
    }

    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    #[must_use]
    pub const fn is_bot(&self) -> bool {
        self.bot
    }

    /// Full `user#tag` form; migrated accounts have no tag.
    #[must_use]
    pub fn tag(&self) -> String {
        if self.discriminator == "0" {
            self.username.clone()
        } else {
            format!("{}#{}", self.username, self.discriminator)
        }
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        self.global_name
            .as_ref()
            .map_or_else(|| self.tag(), Clone::clone)
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> &str {
        &self.id
    }
}
