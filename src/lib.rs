// SPDX-License-Identifier: MPL-2.0
//! `agri_advisor` collects agronomic measurements and asks two hosted
//! prediction services for crop and fertilizer recommendations.
//!
//! It validates form input locally, submits it with cold-start aware timing
//! (a slow-backend hint and a hard ceiling), and reports failures through a
//! small toast notification store with Fluent-localized messages.

#![doc(html_root_url = "https://docs.rs/agri_advisor/0.1.0")]

pub mod config;
pub mod error;
pub mod form;
pub mod i18n;
pub mod logging;
pub mod notifications;
pub mod paths;
pub mod recommendation;
pub mod submission;
pub mod transport;
