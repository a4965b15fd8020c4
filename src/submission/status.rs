// SPDX-License-Identifier: MPL-2.0
use crate::i18n::fluent::I18n;

/// Where a submission currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    InFlight,
    Settled,
}

/// Snapshot published to status watchers on every transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Status {
    pub phase: Phase,
    /// Advisory "backend is slow" flag, only ever set while in flight.
    pub slow_warning: bool,
    /// Failed attempts since the last success.
    pub retry_count: u32,
    /// An inline error is showing. Cleared by a republish when it expires.
    pub inline_error: bool,
}

impl Status {
    /// 1-based number of the attempt in flight or about to be made.
    #[must_use]
    pub fn attempt(&self) -> u32 {
        self.retry_count + 1
    }

    /// Hint to show while `slow_warning` is set.
    #[must_use]
    pub fn slow_warning_hint(&self, i18n: &I18n) -> Option<String> {
        self.slow_warning
            .then(|| slow_warning_text(i18n, self.retry_count))
    }
}

pub(super) fn slow_warning_text(i18n: &I18n, retry_count: u32) -> String {
    let hint = i18n.tr("slow-warning");
    if retry_count == 0 {
        return hint;
    }
    let attempt = (retry_count + 1).to_string();
    let suffix = i18n.tr_with_args("slow-warning-attempt", &[("attempt", &attempt)]);
    format!("{hint} {suffix}")
}
