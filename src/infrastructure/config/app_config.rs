//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::args::CliArgs;
use crate::application::cache::{
    CacheConfig, DEFAULT_ATTACHMENT_LIFETIME, DEFAULT_CLEAN_INTERVAL, DEFAULT_PRUNE_THRESHOLD,
    DEFAULT_REQUEST_TIMEOUT,
};
use crate::infrastructure::discord::DISCORD_API_BASE;

const APP_NAME: &str = "disrelay";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from `config.toml` and overridden by CLI.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Discord API settings.
    #[serde(default)]
    pub discord: DiscordSection,

    /// Cache settings.
    #[serde(default)]
    pub cache: CacheSection,
}

/// Discord API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordSection {
    /// REST API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Timeout for identity lookups, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for DiscordSection {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl DiscordSection {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSection {
    /// Attachments unreferenced for longer than this are evicted, in seconds.
    #[serde(default = "default_attachment_lifetime_secs")]
    pub attachment_lifetime_secs: u64,

    /// Maximum attachment count kept after a clean.
    #[serde(default = "default_prune_threshold")]
    pub attachment_prune_threshold: usize,

    /// Seconds between background cleans.
    #[serde(default = "default_clean_interval_secs")]
    pub clean_interval_secs: u64,

    /// Clean after every attachment insert.
    #[serde(default)]
    pub clean_on_write: bool,

    /// Timeout for attachment downloads, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            attachment_lifetime_secs: default_attachment_lifetime_secs(),
            attachment_prune_threshold: default_prune_threshold(),
            clean_interval_secs: default_clean_interval_secs(),
            clean_on_write: false,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl From<&CacheSection> for CacheConfig {
    fn from(section: &CacheSection) -> Self {
        Self::default()
            .attachment_lifetime(Duration::from_secs(section.attachment_lifetime_secs))
            .prune_threshold(section.attachment_prune_threshold)
            .clean_interval(Duration::from_secs(section.clean_interval_secs))
            .clean_on_write(section.clean_on_write)
            .request_timeout(Duration::from_secs(section.request_timeout_secs))
    }
}

fn default_api_base() -> String {
    DISCORD_API_BASE.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

const fn default_attachment_lifetime_secs() -> u64 {
    DEFAULT_ATTACHMENT_LIFETIME.as_secs()
}

const fn default_prune_threshold() -> usize {
    DEFAULT_PRUNE_THRESHOLD
}

const fn default_clean_interval_secs() -> u64 {
    DEFAULT_CLEAN_INTERVAL.as_secs()
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_base) = &args.api_base {
            self.discord.api_base.clone_from(api_base);
        }
        if let Some(lifetime) = args.attachment_lifetime_secs {
            self.cache.attachment_lifetime_secs = lifetime;
        }
        if let Some(threshold) = args.attachment_prune_threshold {
            self.cache.attachment_prune_threshold = threshold;
        }
        if let Some(timeout) = args.request_timeout_secs {
            self.discord.request_timeout_secs = timeout;
            self.cache.request_timeout_secs = timeout;
        }
    }

    /// Builds the cache configuration from the `[cache]` section.
    #[must_use]
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::from(&self.cache)
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            log_level = "debug"

            [cache]
            attachment_lifetime_secs = 3600
            clean_on_write = true
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.cache.attachment_lifetime_secs, 3600);
        assert!(config.cache.clean_on_write);
        assert_eq!(config.cache.attachment_prune_threshold, 512);
        assert_eq!(config.discord.api_base, DISCORD_API_BASE);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        let cache = config.cache_config();

        assert_eq!(cache.attachment_lifetime, Duration::from_secs(86_400));
        assert_eq!(cache.prune_threshold, 512);
        assert_eq!(cache.clean_interval, Duration::from_secs(600));
        assert!(!cache.clean_on_write);
        assert_eq!(cache.request_timeout, Duration::from_secs(30));
        assert_eq!(config.discord.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_default_config_dir_is_app_scoped() {
        if let Some(dir) = AppConfig::default_config_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
    }

    #[test]
    fn test_args_override_file_values() {
        let mut config: AppConfig = toml::from_str(
            r#"
            [cache]
            attachment_prune_threshold = 10
        "#,
        )
        .unwrap();
        let args = CliArgs::parse_from([
            "disrelay",
            "--token",
            "abc",
            "--attachment-prune-threshold",
            "99",
            "--log-level",
            "warn",
            "user",
            "5678",
        ]);

        config.merge_with_args(&args);

        assert_eq!(config.cache.attachment_prune_threshold, 99);
        assert_eq!(config.log_level, LogLevel::Warn);
    }
}
