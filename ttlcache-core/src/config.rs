use std::time::Duration;

use crate::error::StoreError;

/// Configuration for the store's background cleanup task
///
/// # Example
///
/// ```rust
/// use ttlcache_core::StoreConfig;
/// use std::time::Duration;
///
/// let config = StoreConfig::default()
///     .with_cleanup_interval(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Interval between cleanup runs (default: 60 seconds)
    pub cleanup_interval: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: Duration::from_secs(60),
        }
    }
}

impl StoreConfig {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cleanup interval
    ///
    /// This determines how often the background task sweeps expired entries.
    /// Must be non-zero.
    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    /// Checks the configuration before a store is built from it
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.cleanup_interval.is_zero() {
            return Err(StoreError::ZeroCleanupInterval);
        }
        Ok(())
    }
}
