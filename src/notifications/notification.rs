// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` record, its `Kind`, and the
//! content/patch types producers use to fill and amend it.

use std::fmt;
use tokio::time::Instant;

/// Unique identifier for a notification.
///
/// Identifiers are assigned by the owning [`Store`](super::Store) in
/// increasing order, so a larger id always means a more recent notification
/// from the same store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of notification; drives the renderer's styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kind {
    /// Operation completed successfully.
    Success,
    /// Something failed and the user may want to retry.
    Error,
    /// Something looks off but did not block the operation.
    Warning,
    /// Neutral message.
    #[default]
    Info,
    /// Failure rendered with the strongest emphasis.
    Destructive,
}

impl Kind {
    /// Short lowercase label, used by the terminal renderer and logs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Kind::Success => "success",
            Kind::Error => "error",
            Kind::Warning => "warning",
            Kind::Info => "info",
            Kind::Destructive => "destructive",
        }
    }

    /// Returns true for kinds that report a failure.
    #[must_use]
    pub fn is_failure(self) -> bool {
        matches!(self, Kind::Error | Kind::Destructive)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Text payload of a notification, optionally split into title and body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Content {
    /// Content made of a single message line.
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            title: None,
            description: Some(text.into()),
        }
    }

    /// Content with both a title and a description.
    pub fn titled(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
        }
    }

    /// Joins title and description the way a single-line renderer shows them.
    #[must_use]
    pub fn text(&self) -> String {
        match (&self.title, &self.description) {
            (Some(title), Some(description)) => format!("{title}: {description}"),
            (Some(only), None) | (None, Some(only)) => only.clone(),
            (None, None) => String::new(),
        }
    }
}

/// Partial update merged into an existing notification.
///
/// `None` fields leave the current value untouched. Visibility is not part
/// of the patch: it only changes through dismissal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<Kind>,
}

impl ContentPatch {
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.kind.is_none()
    }
}

/// A notification held by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    id: NotificationId,
    kind: Kind,
    content: Content,
    /// False once dismissed; the record lingers until its removal timer fires.
    open: bool,
    created_at: Instant,
}

impl Notification {
    pub(crate) fn new(id: NotificationId, kind: Kind, content: Content, created_at: Instant) -> Self {
        Self {
            id,
            kind,
            content,
            open: true,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn content(&self) -> &Content {
        &self.content
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.content.title.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.content.description.as_deref()
    }

    /// Whether the notification is still visible.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub(crate) fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Merges `patch` into this record. Returns true if anything was provided.
    pub(crate) fn apply(&mut self, patch: ContentPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        if let Some(title) = patch.title {
            self.content.title = Some(title);
        }
        if let Some(description) = patch.description {
            self.content.description = Some(description);
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        true
    }
}
