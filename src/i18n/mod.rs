// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! This module provides localization capabilities using the Fluent localization system.
//! Every user-visible string (validation messages, inline errors, toasts, hints)
//! is a Fluent key resolved here.
//!
//! # Features
//!
//! - Automatic locale detection from CLI, config, or system settings
//! - Translation files embedded at build time
//! - Fallback to `en-US` when no preferred locale is available

pub mod fluent;
