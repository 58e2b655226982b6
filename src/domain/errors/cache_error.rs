//! Errors surfaced by the relay cache.

use thiserror::Error;

use super::{FetchError, ProviderError};
use crate::domain::entities::{AttachmentMeta, EntityKind};

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Cache error variants.
///
/// Attachment failures carry the name and type the caller supplied so a sink
/// can still report what was skipped.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum CacheError {
    #[error("cache: {kind} {id}: entry not present")]
    Missing { kind: EntityKind, id: String },

    #[error("cache: {kind} {id}: lookup failed: {source}")]
    Provider {
        kind: EntityKind,
        id: String,
        #[source]
        source: ProviderError,
    },

    #[error("cache: attachment download: network request failed: {url}: {message}")]
    Request {
        url: String,
        partial: AttachmentMeta,
        message: String,
    },

    #[error("cache: attachment download: http error: {url}: status {status}")]
    FetchFailed {
        url: String,
        partial: AttachmentMeta,
        status: u16,
    },

    #[error("cache: attachment download: I/O error: {url}: {message}")]
    Io {
        url: String,
        partial: AttachmentMeta,
        message: String,
    },

    #[error("cache: failed to build HTTP client: {message}")]
    Client { message: String },
}

impl CacheError {
    /// Creates missing-entry error.
    #[must_use]
    pub fn missing(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::Missing {
            kind,
            id: id.into(),
        }
    }

    /// Wraps a provider failure with the key that was looked up.
    #[must_use]
    pub fn provider(kind: EntityKind, id: impl Into<String>, source: ProviderError) -> Self {
        Self::Provider {
            kind,
            id: id.into(),
            source,
        }
    }

    /// Maps a fetcher failure onto the matching attachment error class.
    #[must_use]
    pub fn download(url: impl Into<String>, partial: AttachmentMeta, source: FetchError) -> Self {
        let url = url.into();
        match source {
            FetchError::Request { message } => Self::Request {
                url,
                partial,
                message,
            },
            FetchError::Status { status } => Self::FetchFailed {
                url,
                partial,
                status,
            },
            FetchError::Body { message } => Self::Io {
                url,
                partial,
                message,
            },
        }
    }

    /// Creates client construction error.
    #[must_use]
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
        }
    }

    /// Returns whether an invalidation targeted an absent entry.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }

    /// Returns whether the provider reported the ID as unknown.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Provider {
                source: ProviderError::NotFound { .. },
                ..
            }
        )
    }

    #[must_use]
    pub const fn is_request_failure(&self) -> bool {
        matches!(self, Self::Request { .. })
    }

    #[must_use]
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::FetchFailed { .. })
    }

    #[must_use]
    pub const fn is_io_failure(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Attachment name and type for failed downloads.
    #[must_use]
    pub const fn partial_attachment(&self) -> Option<&AttachmentMeta> {
        match self {
            Self::Request { partial, .. }
            | Self::FetchFailed { partial, .. }
            | Self::Io { partial, .. } => Some(partial),
            _ => None,
        }
    }
}
