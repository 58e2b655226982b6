//! Disrelay - Discord message relay with a read-through cache.
//!
//! This crate resolves the channels, users, guilds and attachments referenced
//! by inbound Discord messages, memoizing lookups in memory and bounding the
//! attachment store with age and overflow eviction.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the cache and use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "disrelay";
