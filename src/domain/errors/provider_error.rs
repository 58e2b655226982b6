//! Errors reported by identity providers.

use thiserror::Error;

use crate::domain::entities::EntityKind;

/// Provider error variants.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum ProviderError {
    #[error("unknown {kind} {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("request rejected by Discord: {message}")]
    Unauthorized { message: String },

    #[error("rate limited by Discord, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("malformed response: {message}")]
    Decode { message: String },

    #[error("unexpected provider error: {message}")]
    Unexpected { message: String },
}

impl ProviderError {
    /// Creates not-found error.
    #[must_use]
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Creates unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether the ID is unknown to the backing API.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::RateLimited { .. })
    }
}
