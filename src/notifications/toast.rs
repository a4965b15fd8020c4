// SPDX-License-Identifier: MPL-2.0
//! Terminal rendering of notifications.
//!
//! Toasts are the visual representation of notifications. In a terminal they
//! become one line each, prefixed with a kind marker.

use super::notification::{Kind, Notification, NotificationId};
use std::collections::HashSet;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// Toast renderer.
pub struct Toast;

impl Toast {
    /// Renders a single notification as one line.
    #[must_use]
    pub fn line(notification: &Notification) -> String {
        format!(
            "{} {}",
            Self::marker(notification.kind()),
            notification.content().text()
        )
    }

    /// Renders every visible notification, newest first.
    #[must_use]
    pub fn lines(notifications: &[Notification]) -> Vec<String> {
        notifications
            .iter()
            .filter(|n| n.is_open())
            .map(Self::line)
            .collect()
    }

    /// Builds a store listener that writes each notification to `out` once,
    /// the first time it shows up open.
    pub fn printer<W>(out: W) -> impl Fn(&[Notification]) + Send + Sync + 'static
    where
        W: Write + Send + 'static,
    {
        let printed: Mutex<(W, HashSet<NotificationId>)> = Mutex::new((out, HashSet::new()));
        move |notifications| {
            let mut guard = printed.lock().unwrap_or_else(PoisonError::into_inner);
            let (out, seen) = &mut *guard;
            for notification in notifications.iter().rev().filter(|n| n.is_open()) {
                if seen.insert(notification.id()) {
                    // Terminal output is best effort.
                    let _ = writeln!(out, "{}", Self::line(notification));
                }
            }
            seen.retain(|id| notifications.iter().any(|n| n.id() == *id));
        }
    }

    fn marker(kind: Kind) -> &'static str {
        match kind {
            Kind::Success => "[ok]",
            Kind::Info => "[i]",
            Kind::Warning => "[!]",
            Kind::Error => "[x]",
            Kind::Destructive => "[X]",
        }
    }
}
