//! Query cache configuration.

use std::num::NonZeroUsize;
use std::time::Duration;

const DEFAULT_CAPACITY: usize = 256;
const DEFAULT_STALE_TIME_MS: u64 = 0;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries kept. Entries with subscribers or a
    /// request in flight are never evicted, so the cache may exceed this
    /// while they are live.
    pub capacity: usize,
    /// Age below which cached data is served without refetching.
    pub stale_time: Duration,
    /// Show the previous key's data while a changed key loads.
    pub keep_previous_data: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            stale_time: Duration::from_millis(DEFAULT_STALE_TIME_MS),
            keep_previous_data: true,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            capacity: settings.capacity.get(),
            stale_time: settings.stale_time,
            keep_previous_data: settings.keep_previous_data,
        }
    }
}

impl CacheConfig {
    /// Returns the capacity as NonZeroUsize, clamping to 1 if zero.
    pub fn capacity_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.capacity).unwrap_or(NonZeroUsize::MIN)
    }
}
