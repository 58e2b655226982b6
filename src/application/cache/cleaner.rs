//! Periodic attachment eviction.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

use super::facade::Cache;

/// Runs [`Cache::clean_attachments`] on a fixed interval until stopped.
pub struct CacheCleaner {
    interval: Duration,
    running: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
}

impl CacheCleaner {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: Arc::new(AtomicBool::new(false)),
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Creates a cleaner using the interval from the cache's configuration.
    #[must_use]
    pub fn for_cache(cache: &Cache) -> Self {
        Self::new(cache.config().clean_interval)
    }

    /// Spawns the clean loop. The first clean happens one interval from now.
    ///
    /// Returns `None` without spawning if the loop is already running.
    pub fn start(&self, cache: Arc<Cache>) -> Option<tokio::task::JoinHandle<()>> {
        if self.running.swap(true, Ordering::SeqCst) {
            debug!("Cache cleaner already running");
            return None;
        }

        let period = self.interval.max(Duration::from_millis(1));
        let running = self.running.clone();
        let shutdown = self.shutdown.clone();

        Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            while running.load(Ordering::SeqCst) {
                tokio::select! {
                    _ = ticker.tick() => {}
                    // A permit left by an earlier stop is ignored while running.
                    () = shutdown.notified() => continue,
                }

                if !running.load(Ordering::SeqCst) {
                    break;
                }

                let report = cache.clean_attachments();
                debug!(
                    removed = report.removed(),
                    remaining = report.remaining,
                    "Periodic attachment clean"
                );
            }

            debug!("Cache cleaner stopped");
        }))
    }

    /// Stops the loop; an in-progress clean finishes first.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.shutdown.notify_one();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for CacheCleaner {
    fn drop(&mut self) {
        self.stop();
    }
}
