//! Cache configuration.

use std::time::Duration;

/// Default age after which an unreferenced attachment is dropped.
pub const DEFAULT_ATTACHMENT_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Default number of attachments kept after an overflow prune.
pub const DEFAULT_PRUNE_THRESHOLD: usize = 512;

/// Default period of the background cleaner.
pub const DEFAULT_CLEAN_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Default timeout for attachment downloads.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Tuning for the attachment cache and its cleaner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Attachments last referenced longer ago than this are removed by a clean.
    pub attachment_lifetime: Duration,

    /// Maximum attachment count left behind by a clean.
    pub prune_threshold: usize,

    /// How often the background cleaner runs.
    pub clean_interval: Duration,

    /// Run a clean after every attachment insert.
    pub clean_on_write: bool,

    /// Upper bound on a single attachment download.
    pub request_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            attachment_lifetime: DEFAULT_ATTACHMENT_LIFETIME,
            prune_threshold: DEFAULT_PRUNE_THRESHOLD,
            clean_interval: DEFAULT_CLEAN_INTERVAL,
            clean_on_write: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl CacheConfig {
    /// Set the attachment lifetime (builder pattern).
    #[must_use]
    pub const fn attachment_lifetime(mut self, lifetime: Duration) -> Self {
        self.attachment_lifetime = lifetime;
        self
    }

    /// Set the overflow prune threshold.
    #[must_use]
    pub const fn prune_threshold(mut self, threshold: usize) -> Self {
        self.prune_threshold = threshold;
        self
    }

    /// Set the background clean interval.
    #[must_use]
    pub const fn clean_interval(mut self, interval: Duration) -> Self {
        self.clean_interval = interval;
        self
    }

    /// Enable or disable cleaning after each attachment insert.
    #[must_use]
    pub const fn clean_on_write(mut self, enabled: bool) -> Self {
        self.clean_on_write = enabled;
        self
    }

    /// Set the attachment download timeout.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.attachment_lifetime, Duration::from_secs(86_400));
        assert_eq!(config.prune_threshold, 512);
        assert!(!config.clean_on_write);
    }

    #[test]
    fn test_builder() {
        let config = CacheConfig::default()
            .prune_threshold(10)
            .attachment_lifetime(Duration::from_secs(60))
            .clean_on_write(true);

        assert_eq!(config.prune_threshold, 10);
        assert_eq!(config.attachment_lifetime, Duration::from_secs(60));
        assert!(config.clean_on_write);
    }
}
