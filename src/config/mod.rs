// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, loaded from a
//! `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[general]` - Language
//! - `[notifications]` - Toast limit, removal delay, default lifetime
//! - `[submission]` - Slow-backend hint, hard ceiling, inline error lifetime
//! - `[services]` - Prediction endpoints and HTTP client timeout
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` on the command line
//! 3. Set `AGRI_ADVISOR_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use agri_advisor::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Make the slow-backend hint show up later
//! config.submission.slow_warning_ms = Some(8_000);
//!
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::notifications::StoreSettings;
use crate::paths;
use crate::recommendation::Service;
use crate::submission::TimingPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// i18n key of the warning shown when the settings file cannot be read.
pub const LOAD_ERROR_KEY: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Toast notification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationsConfig {
    /// Maximum number of notifications held at once.
    #[serde(default = "default_limit", skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Delay between dismissal and removal, in milliseconds.
    #[serde(
        default = "default_remove_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub remove_delay_ms: Option<u64>,

    /// Lifetime of self-removing notifications, in milliseconds.
    #[serde(
        default = "default_notification_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_duration_ms: Option<u64>,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            remove_delay_ms: default_remove_delay_ms(),
            default_duration_ms: default_notification_duration_ms(),
        }
    }
}

/// Submission timing settings shared by both forms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionConfig {
    /// Time before the slow-backend hint shows, in milliseconds.
    #[serde(
        default = "default_slow_warning_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub slow_warning_ms: Option<u64>,

    /// Hard ceiling in milliseconds; `0` disables it.
    #[serde(
        default = "default_hard_timeout_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub hard_timeout_ms: Option<u64>,

    /// Lifetime of the inline error in milliseconds; `0` keeps it until the
    /// next attempt.
    #[serde(
        default = "default_error_clear_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub error_clear_ms: Option<u64>,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            slow_warning_ms: default_slow_warning_ms(),
            hard_timeout_ms: default_hard_timeout_ms(),
            error_clear_ms: default_error_clear_ms(),
        }
    }
}

/// Prediction service endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServicesConfig {
    #[serde(default = "default_crop_url", skip_serializing_if = "Option::is_none")]
    pub crop_url: Option<String>,

    #[serde(
        default = "default_fertilizer_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub fertilizer_url: Option<String>,

    /// Socket-level timeout of the HTTP client in milliseconds; `0` disables it.
    #[serde(
        default = "default_request_timeout_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_timeout_ms: Option<u64>,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            crop_url: default_crop_url(),
            fertilizer_url: default_fertilizer_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub notifications: NotificationsConfig,

    #[serde(default)]
    pub submission: SubmissionConfig,

    #[serde(default)]
    pub services: ServicesConfig,
}

impl Config {
    /// Notification store settings, with the limit clamped to `1..=MAX`.
    #[must_use]
    pub fn store_settings(&self) -> StoreSettings {
        let section = &self.notifications;
        StoreSettings {
            limit: section
                .limit
                .unwrap_or(DEFAULT_NOTIFICATION_LIMIT)
                .clamp(1, MAX_NOTIFICATION_LIMIT),
            remove_delay: Duration::from_millis(
                section.remove_delay_ms.unwrap_or(DEFAULT_REMOVE_DELAY_MS),
            ),
            default_duration: Duration::from_millis(
                section
                    .default_duration_ms
                    .unwrap_or(DEFAULT_NOTIFICATION_DURATION_MS),
            ),
        }
    }

    /// Submission timing policy. A hard ceiling shorter than the slow-backend
    /// hint is raised to the hint's delay.
    #[must_use]
    pub fn timing_policy(&self) -> TimingPolicy {
        let section = &self.submission;
        let slow_warning =
            Duration::from_millis(section.slow_warning_ms.unwrap_or(DEFAULT_SLOW_WARNING_MS));
        let hard_timeout = match section.hard_timeout_ms.unwrap_or(DEFAULT_HARD_TIMEOUT_MS) {
            0 => None,
            ms => Some(Duration::from_millis(ms).max(slow_warning)),
        };
        let error_clear_after = match section.error_clear_ms.unwrap_or(DEFAULT_ERROR_CLEAR_MS) {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };

        TimingPolicy {
            slow_warning,
            hard_timeout,
            error_clear_after,
        }
    }

    /// Endpoint configured for `service`.
    #[must_use]
    pub fn endpoint(&self, service: Service) -> &str {
        match service {
            Service::Crop => self.services.crop_url.as_deref().unwrap_or(DEFAULT_CROP_URL),
            Service::Fertilizer => self
                .services
                .fertilizer_url
                .as_deref()
                .unwrap_or(DEFAULT_FERTILIZER_URL),
        }
    }

    /// Socket-level timeout for the HTTP client, if any.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        match self
            .services
            .request_timeout_ms
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS)
        {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_limit() -> Option<usize> {
    Some(DEFAULT_NOTIFICATION_LIMIT)
}

fn default_remove_delay_ms() -> Option<u64> {
    Some(DEFAULT_REMOVE_DELAY_MS)
}

fn default_notification_duration_ms() -> Option<u64> {
    Some(DEFAULT_NOTIFICATION_DURATION_MS)
}

fn default_slow_warning_ms() -> Option<u64> {
    Some(DEFAULT_SLOW_WARNING_MS)
}

fn default_hard_timeout_ms() -> Option<u64> {
    Some(DEFAULT_HARD_TIMEOUT_MS)
}

fn default_error_clear_ms() -> Option<u64> {
    Some(DEFAULT_ERROR_CLEAR_MS)
}

fn default_crop_url() -> Option<String> {
    Some(DEFAULT_CROP_URL.to_string())
}

fn default_fertilizer_url() -> Option<String> {
    Some(DEFAULT_FERTILIZER_URL.to_string())
}

fn default_request_timeout_ms() -> Option<u64> {
    Some(DEFAULT_REQUEST_TIMEOUT_MS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default settings");
                    return (Config::default(), Some(LOAD_ERROR_KEY.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    let path = get_config_path_with_override(base_dir)
        .ok_or_else(|| Error::Config("no configuration directory available".to_string()))?;
    save_to_path(config, &path)
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
