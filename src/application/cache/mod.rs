//! Read-through cache between the event handlers and the Discord API.
//!
//! - [`EntityCache`] memoizes channels, users and guilds by ID
//! - [`AttachmentCache`] memoizes downloaded attachment content by URL and
//!   bounds itself with age and overflow eviction
//! - [`Cache`] bundles both behind one handle
//! - [`CacheCleaner`] runs eviction in the background

mod attachment_cache;
mod cleaner;
mod config;
mod entity_cache;
mod facade;
mod stats;

pub use attachment_cache::{AttachmentCache, CleanReport};
pub use cleaner::CacheCleaner;
pub use config::{
    CacheConfig, DEFAULT_ATTACHMENT_LIFETIME, DEFAULT_CLEAN_INTERVAL, DEFAULT_PRUNE_THRESHOLD,
    DEFAULT_REQUEST_TIMEOUT,
};
pub use entity_cache::EntityCache;
pub use facade::Cache;
pub use stats::{CacheOverview, CacheStats};
