//! HTTP adapters for attachment content.

mod fetcher;

pub use fetcher::{HttpAttachmentFetcher, USER_AGENT};
