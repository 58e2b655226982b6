//! Identity provider port.

use async_trait::async_trait;

use crate::domain::entities::{Channel, Guild, User};
use crate::domain::errors::ProviderError;

/// Supplies channel, user and guild metadata by ID.
///
/// Implementations return [`ProviderError::NotFound`] when the ID is unknown to
/// the backing API; every other variant is a transport or auth failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Provider: Send + Sync {
    /// Fetches a channel by ID.
    async fn fetch_channel(&self, id: &str) -> Result<Channel, ProviderError>;

    /// Fetches a user by ID.
    async fn fetch_user(&self, id: &str) -> Result<User, ProviderError>;

    /// Fetches a guild by ID.
    async fn fetch_guild(&self, id: &str) -> Result<Guild, ProviderError>;
}
