// SPDX-License-Identifier: MPL-2.0
use crate::config::{DEFAULT_ERROR_CLEAR_MS, DEFAULT_HARD_TIMEOUT_MS, DEFAULT_SLOW_WARNING_MS};
use std::time::Duration;

/// Timers of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingPolicy {
    /// Delay before the "service is waking up" hint appears.
    pub slow_warning: Duration,
    /// Ceiling after which the request is cancelled. `None` waits forever.
    pub hard_timeout: Option<Duration>,
    /// Lifetime of the inline error. `None` keeps it until the next submit.
    pub error_clear_after: Option<Duration>,
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self {
            slow_warning: Duration::from_millis(DEFAULT_SLOW_WARNING_MS),
            hard_timeout: Some(Duration::from_millis(DEFAULT_HARD_TIMEOUT_MS)),
            error_clear_after: Some(Duration::from_millis(DEFAULT_ERROR_CLEAR_MS)),
        }
    }
}
