//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Discord REST API client.
pub mod discord;
/// Attachment downloads over HTTP.
pub mod http;

pub use config::{AppConfig, CliArgs, Command, ConfigError, ConfigStore, LogLevel};
pub use discord::DiscordRestProvider;
pub use http::HttpAttachmentFetcher;
