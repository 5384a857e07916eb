//! Timeout configuration for outbound requests.

use crate::dependency::DependencyTag;
use std::time::Duration;

/// Timeout configuration for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Total operation timeout.
    pub total: Duration,
}

impl TimeoutConfig {
    pub fn new(connect: Duration, total: Duration) -> Self {
        Self { connect, total }
    }

    /// Create from a single total timeout.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: (total / 4).max(Duration::from_millis(100)),
            total,
        }
    }

    /// Defaults for a dependency.
    pub fn for_tag(tag: DependencyTag) -> Self {
        Self::from_total(tag.default_timeout())
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from_total(Duration::from_secs(10))
    }
}

/// Per-dependency timeouts, optionally overridden by one global value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeouts {
    /// When set, applies to every dependency.
    pub total_override: Option<Duration>,
}

impl Timeouts {
    pub fn with_override(total: Duration) -> Self {
        Self {
            total_override: Some(total),
        }
    }

    /// Connection timeout shared by every dependency.
    pub fn connect(&self) -> Duration {
        match self.total_override {
            Some(total) => TimeoutConfig::from_total(total).connect,
            None => TimeoutConfig::default().connect,
        }
    }

    pub fn for_tag(&self, tag: DependencyTag) -> TimeoutConfig {
        match self.total_override {
            Some(total) => TimeoutConfig::from_total(total),
            None => TimeoutConfig::for_tag(tag),
        }
    }
}
