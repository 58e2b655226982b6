//! Attachment content fetcher port.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::FetchError;

/// A successfully downloaded response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedContent {
    /// `Content-Type` header, if the server sent one.
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Retrieves binary content by URL.
#[async_trait]
pub trait AttachmentFetcher: Send + Sync {
    /// Downloads `url`. Only a 200 response with a fully read body is `Ok`.
    async fn fetch(&self, url: &str) -> Result<FetchedContent, FetchError>;
}
