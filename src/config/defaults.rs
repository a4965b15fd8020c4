// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Notifications**: toast limit, removal delay, lifetime
//! - **Submission**: slow-backend hint, hard ceiling, inline error lifetime
//! - **Services**: prediction endpoints and socket timeout

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Maximum number of notifications held at once.
pub const DEFAULT_NOTIFICATION_LIMIT: usize = 1;

/// Upper bound accepted for the notification limit.
pub const MAX_NOTIFICATION_LIMIT: usize = 20;

/// Delay between dismissing a notification and removing it (milliseconds).
pub const DEFAULT_REMOVE_DELAY_MS: u64 = 3_000;

/// Lifetime of notifications shown through the convenience producers (milliseconds).
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 3_000;

// ==========================================================================
// Submission Defaults
// ==========================================================================

/// Time before the "service is waking up" hint appears (milliseconds).
pub const DEFAULT_SLOW_WARNING_MS: u64 = 5_000;

/// Absolute ceiling after which an in-flight request is cancelled (milliseconds).
pub const DEFAULT_HARD_TIMEOUT_MS: u64 = 60_000;

/// Lifetime of the inline error message of a form (milliseconds).
pub const DEFAULT_ERROR_CLEAR_MS: u64 = 4_000;

// ==========================================================================
// Service Defaults
// ==========================================================================

/// Crop recommendation endpoint.
pub const DEFAULT_CROP_URL: &str = "https://croprecommendation-api.onrender.com/predict";

/// Fertilizer recommendation endpoint.
pub const DEFAULT_FERTILIZER_URL: &str = "https://fertilizer-api-pi50.onrender.com/predict";

/// Socket-level timeout of the HTTP client (milliseconds).
///
/// Kept above the hard ceiling so the ceiling is what normally ends a stuck
/// request.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 90_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_ceiling_outlasts_slow_warning() {
        assert!(DEFAULT_HARD_TIMEOUT_MS > DEFAULT_SLOW_WARNING_MS);
    }

    #[test]
    fn socket_timeout_outlasts_hard_ceiling() {
        assert!(DEFAULT_REQUEST_TIMEOUT_MS > DEFAULT_HARD_TIMEOUT_MS);
    }

    #[test]
    fn notification_limit_within_bounds() {
        assert!(DEFAULT_NOTIFICATION_LIMIT >= 1);
        assert!(DEFAULT_NOTIFICATION_LIMIT <= MAX_NOTIFICATION_LIMIT);
    }
}
