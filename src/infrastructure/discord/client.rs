//! Discord REST API client backing the identity caches.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{ChannelResponse, ErrorResponse, GuildResponse, UserResponse};
use crate::domain::entities::{BotToken, Channel, EntityKind, Guild, User};
use crate::domain::errors::ProviderError;
use crate::domain::ports::Provider;
use crate::infrastructure::http::USER_AGENT;

pub const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

const DEFAULT_RETRY_AFTER_MS: u64 = 5000;

/// Looks up channels, users and guilds through the Discord REST API.
pub struct DiscordRestProvider {
    client: Client,
    base_url: String,
    token: BotToken,
}

impl std::fmt::Debug for DiscordRestProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordRestProvider")
            .field("base_url", &self.base_url)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl DiscordRestProvider {
    /// Creates new provider against the public API.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(token: BotToken, timeout: Duration) -> Result<Self, ProviderError> {
        Self::with_base_url(token, DISCORD_API_BASE, timeout)
    }

    /// Creates provider with custom base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(
        token: BotToken,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn get<T: DeserializeOwned>(&self, kind: EntityKind, id: &str) -> Result<T, ProviderError> {
        let url = format!("{}/{}/{id}", self.base_url, resource_path(kind));

        debug!(kind = %kind, id = %id, "Fetching from Discord API");

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, self.token.authorization())
            .send()
            .await
            .map_err(|e| {
                warn!(kind = %kind, id = %id, error = %e, "Failed to connect to Discord API");
                if e.is_timeout() {
                    ProviderError::network("request timed out")
                } else if e.is_connect() {
                    ProviderError::network("failed to connect to Discord")
                } else {
                    ProviderError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorResponse>().await.ok();
            return Err(status_error(status, kind, id, body.as_ref()));
        }

        response.json::<T>().await.map_err(|e| {
            warn!(kind = %kind, id = %id, error = %e, "Failed to parse Discord response");
            ProviderError::decode(format!("failed to parse {kind} response: {e}"))
        })
    }
}

const fn resource_path(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Channel => "channels",
        EntityKind::User => "users",
        EntityKind::Guild => "guilds",
    }
}

/// Maps a non-success status to a provider error.
fn status_error(
    status: StatusCode,
    kind: EntityKind,
    id: &str,
    body: Option<&ErrorResponse>,
) -> ProviderError {
    let message = body
        .map(|b| b.message.as_str())
        .filter(|m| !m.is_empty())
        .map_or_else(|| format!("HTTP {status}"), str::to_owned);

    match status {
        StatusCode::NOT_FOUND => ProviderError::not_found(kind, id),
        StatusCode::UNAUTHORIZED => ProviderError::unauthorized("invalid bot token"),
        StatusCode::FORBIDDEN => ProviderError::unauthorized(format!("access denied: {message}")),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited {
            retry_after_ms: body
                .and_then(|b| b.retry_after)
                .filter(|secs| secs.is_finite() && *secs >= 0.0)
                .map_or(DEFAULT_RETRY_AFTER_MS, secs_to_ms),
        },
        s if s.is_server_error() => {
            ProviderError::network(format!("Discord API is temporarily unavailable ({s})"))
        }
        _ => ProviderError::unexpected(format!("unexpected response: {status} - {message}")),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn secs_to_ms(secs: f64) -> u64 {
    (secs * 1000.0).ceil() as u64
}

#[async_trait]
impl Provider for DiscordRestProvider {
    async fn fetch_channel(&self, id: &str) -> Result<Channel, ProviderError> {
        self.get::<ChannelResponse>(EntityKind::Channel, id)
            .await
            .map(Channel::from)
    }

    async fn fetch_user(&self, id: &str) -> Result<User, ProviderError> {
        self.get::<UserResponse>(EntityKind::User, id)
            .await
            .map(User::from)
    }

    async fn fetch_guild(&self, id: &str) -> Result<Guild, ProviderError> {
        self.get::<GuildResponse>(EntityKind::Guild, id)
            .await
            .map(Guild::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use test_case::test_case;

    fn token() -> BotToken {
        BotToken::new("test-token").unwrap()
    }

    fn provider(base_url: &str) -> DiscordRestProvider {
        DiscordRestProvider::with_base_url(token(), base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_client_creation() {
        assert!(DiscordRestProvider::new(token(), Duration::from_secs(30)).is_ok());
    }

    #[test]
    fn test_debug_masks_token() {
        let provider = provider("http://localhost");
        assert!(!format!("{provider:?}").contains("test-token"));
    }

    #[test_case(404, "not_found" ; "not found")]
    #[test_case(401, "unauthorized" ; "unauthorized")]
    #[test_case(403, "unauthorized" ; "forbidden")]
    #[test_case(429, "rate_limited" ; "rate limited")]
    #[test_case(500, "network" ; "internal error")]
    #[test_case(503, "network" ; "unavailable")]
    #[test_case(400, "unexpected" ; "bad request")]
    fn test_status_mapping(status: u16, expected: &str) {
        let status = StatusCode::from_u16(status).unwrap();
        let err = status_error(status, EntityKind::User, "abcd", None);

        let actual = match err {
            ProviderError::NotFound { .. } => "not_found",
            ProviderError::Unauthorized { .. } => "unauthorized",
            ProviderError::RateLimited { .. } => "rate_limited",
            ProviderError::Network { .. } => "network",
            ProviderError::Decode { .. } => "decode",
            ProviderError::Unexpected { .. } => "unexpected",
        };
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_retry_after_from_body() {
        let body = ErrorResponse {
            message: "You are being rate limited.".to_string(),
            retry_after: Some(0.25),
        };
        let err = status_error(
            StatusCode::TOO_MANY_REQUESTS,
            EntityKind::Guild,
            "1",
            Some(&body),
        );

        assert!(matches!(
            err,
            ProviderError::RateLimited {
                retry_after_ms: 250
            }
        ));
    }

    #[tokio::test]
    async fn test_fetch_channel() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/channels/1234")
            .match_header("authorization", "Bot test-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"id":"1234","type":0,"guild_id":"9101112","name":"Testing Channel","topic":null}"#,
            )
            .create_async()
            .await;

        let channel = provider(&server.url()).fetch_channel("1234").await.unwrap();

        assert_eq!(channel.name(), "Testing Channel");
        assert_eq!(channel.guild_id(), Some("9101112"));
    }

    #[tokio::test]
    async fn test_fetch_user() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/5678")
            .with_status(200)
            .with_body(r#"{"id":"5678","username":"Testing User","discriminator":"0","avatar":null,"bot":true}"#)
            .create_async()
            .await;

        let user = provider(&server.url()).fetch_user("5678").await.unwrap();

        assert_eq!(user.username(), "Testing User");
        assert!(user.is_bot());
    }

    #[tokio::test]
    async fn test_fetch_guild() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/guilds/9101112")
            .with_status(200)
            .with_body(r#"{"id":"9101112","name":"Testing Server","icon":null,"owner_id":"5678"}"#)
            .create_async()
            .await;

        let guild = provider(&server.url()).fetch_guild("9101112").await.unwrap();

        assert_eq!(guild.name(), "Testing Server");
        assert_eq!(guild.owner_id(), Some("5678"));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", Matcher::Regex(r"^/guilds/.*$".to_string()))
            .with_status(404)
            .with_body(r#"{"message":"Unknown Guild","code":10004}"#)
            .create_async()
            .await;

        let err = provider(&server.url()).fetch_guild("abcd").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "unknown guild abcd");
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/1")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = provider(&server.url()).fetch_user("1").await.unwrap_err();

        assert!(matches!(err, ProviderError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_network_error() {
        let err = provider("http://127.0.0.1:1")
            .fetch_channel("1234")
            .await
            .unwrap_err();

        assert!(err.is_network_error());
    }
}
