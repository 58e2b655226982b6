//! Errors reported by attachment fetchers.

use thiserror::Error;

/// The three ways an attachment download can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, DNS or timeout failure before a response arrived.
    #[error("network request failed: {message}")]
    Request { message: String },

    /// The server answered with something other than 200.
    #[error("http error: status {status}")]
    Status { status: u16 },

    /// The body could not be read after a 200 response.
    #[error("I/O error: {message}")]
    Body { message: String },
}

impl FetchError {
    #[must_use]
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn body(message: impl Into<String>) -> Self {
        Self::Body {
            message: message.into(),
        }
    }
}
