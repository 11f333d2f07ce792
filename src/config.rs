//! Polling configuration

use serde::Deserialize;
use std::time::Duration;

/// Intervals for the background polling loop.
///
/// Repository-validity checks are cheap but a status refresh spawns an
/// external process, so refreshes run on a longer cadence than the tick,
/// and back off further while the root is not a repository at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollConfig {
    /// Loop tick, in milliseconds
    pub tick_ms: u64,
    /// Delay between status refreshes while inside a repository
    pub refresh_interval_ms: u64,
    /// Delay before re-checking a root that is not a repository
    pub not_repository_backoff_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            tick_ms: 1_000,
            refresh_interval_ms: 5_000,
            not_repository_backoff_ms: 30_000,
        }
    }
}

impl PollConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn not_repository_backoff(&self) -> Duration {
        Duration::from_millis(self.not_repository_backoff_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PollConfig::default();
        assert_eq!(config.tick(), Duration::from_secs(1));
        assert_eq!(config.refresh_interval(), Duration::from_secs(5));
        assert_eq!(config.not_repository_backoff(), Duration::from_secs(30));
    }
}
