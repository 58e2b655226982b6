use serde::Deserialize;

use crate::domain::entities::{Channel, ChannelKind, Guild, User};

/// Discord API channel response structure.
#[derive(Debug, Deserialize)]
pub struct ChannelResponse {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: u8,
    /// Absent for DM channels.
    #[serde(default)]
    pub guild_id: Option<String>,
    /// DM channels carry no name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
}

impl From<ChannelResponse> for Channel {
    fn from(response: ChannelResponse) -> Self {
        let mut channel = Self::new(
            response.id,
            response.name.unwrap_or_default(),
            ChannelKind::from(response.kind),
        );
        if let Some(guild_id) = response.guild_id {
            channel = channel.with_guild(guild_id);
        }
        if let Some(topic) = response.topic {
            channel = channel.with_topic(topic);
        }
        channel
    }
}

/// Discord API user response structure.
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    /// `"0"` for users on the new username system.
    #[serde(default)]
    pub discriminator: String,
    #[serde(default)]
    pub global_name: Option<String>,
    pub avatar: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

impl From<UserResponse> for User {
    fn from(response: UserResponse) -> Self {
        let user = Self::new(
            response.id,
            response.username,
            response.discriminator,
            response.avatar,
            response.bot,
        );
        match response.global_name {
            Some(global_name) => user.with_global_name(global_name),
            None => user,
        }
    }
}

/// Discord API guild response structure.
#[derive(Debug, Deserialize)]
pub struct GuildResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
}

impl From<GuildResponse> for Guild {
    fn from(response: GuildResponse) -> Self {
        let mut guild = Self::new(response.id, response.name);
        if let Some(icon) = response.icon {
            guild = guild.with_icon(icon);
        }
        if let Some(owner_id) = response.owner_id {
            guild = guild.with_owner(owner_id);
        }
        guild
    }
}

/// Discord API error response structure.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error message from Discord.
    #[serde(default)]
    pub message: String,
    /// Seconds to wait, present on 429 responses.
    #[serde(default)]
    pub retry_after: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dm_channel_without_name() {
        let response: ChannelResponse =
            serde_json::from_str(r#"{"id":"55","type":1,"recipients":[]}"#).unwrap();
        let channel = Channel::from(response);

        assert_eq!(channel.name(), "");
        assert!(channel.kind().is_private());
        assert!(channel.guild_id().is_none());
    }

    #[test]
    fn test_user_with_global_name() {
        let response: UserResponse = serde_json::from_str(
            r#"{"id":"5678","username":"tester","discriminator":"0","global_name":"Testing User","avatar":null}"#,
        )
        .unwrap();
        let user = User::from(response);

        assert_eq!(user.username(), "tester");
        assert_eq!(user.global_name(), Some("Testing User"));
        assert!(!user.is_bot());
    }

    #[test]
    fn test_rate_limit_body() {
        let response: ErrorResponse = serde_json::from_str(
            r#"{"message":"You are being rate limited.","retry_after":1.5,"global":false}"#,
        )
        .unwrap();

        assert_eq!(response.retry_after, Some(1.5));
    }
}
