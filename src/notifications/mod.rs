// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Notifications are short-lived status messages that are not tied to a form
//! or page. Every producer and every renderer of one application context
//! shares a single [`Store`], which makes it the source of truth for what is
//! currently shown.
//!
//! # Components
//!
//! - [`notification`] - `Notification` record, `Kind`, content and patch types
//! - [`store`] - `Store` for queuing, timers, and subscriber broadcast
//! - [`Toast`] - terminal renderer
//!
//! # Usage
//!
//! ```
//! use agri_advisor::notifications::{Content, Kind, Store};
//!
//! let store = Store::default();
//! let _subscription = store.subscribe(|notifications| {
//!     for n in notifications.iter().filter(|n| n.is_open()) {
//!         eprintln!("{}", n.content().text());
//!     }
//! });
//!
//! let id = store.create(Content::titled("Saved", "Settings updated"), Kind::Success, None);
//! store.dismiss(Some(id));
//! ```
//!
//! # Lifecycle
//!
//! - `create` shows a notification; the oldest ones beyond the limit (1 by default) are dropped
//! - `dismiss` hides it and removes it 3s later
//! - `success`/`error`/`info`/`warning` remove themselves after their duration

pub mod notification;
pub mod store;
mod toast;

pub use notification::{Content, ContentPatch, Kind, Notification, NotificationId};
pub use store::{Store, StoreSettings, Subscription};
pub use toast::Toast;
