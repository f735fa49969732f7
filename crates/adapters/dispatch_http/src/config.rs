//! Device transport configuration.

use std::time::Duration;

use serde::Deserialize;

use signalhub_app::dispatcher::DispatcherConfig;

/// Configuration for reaching traffic-light devices over HTTP.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Port every device serves its control endpoint on.
    pub device_port: u16,
    /// Upper bound on a single command, in milliseconds.
    pub timeout_ms: u64,
    /// Number of commands in flight at once.
    pub workers: usize,
    /// Commands buffered before new ones are dropped.
    pub queue_capacity: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            device_port: 5000,
            timeout_ms: 500,
            workers: 8,
            queue_capacity: 256,
        }
    }
}

impl DispatchConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Worker pool settings for the application [`Dispatcher`](signalhub_app::dispatcher::Dispatcher).
    #[must_use]
    pub fn dispatcher(&self) -> DispatcherConfig {
        DispatcherConfig {
            workers: self.workers,
            queue_capacity: self.queue_capacity,
            timeout: self.timeout(),
        }
    }
}
