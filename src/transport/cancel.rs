// SPDX-License-Identifier: MPL-2.0
//! Cooperative cancellation shared between a submission and its transport.

use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Why a request was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The hard ceiling of the submission elapsed.
    Deadline,
    /// Someone outside the submission asked to stop.
    User,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Deadline => f.write_str("deadline"),
            CancelReason::User => f.write_str("user"),
        }
    }
}

/// Cancellation token for one submission.
///
/// Clones share state. Only the first [`cancel`](Self::cancel) counts; later
/// reasons are ignored so the outcome reflects what actually stopped the
/// request.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    state: Arc<watch::Sender<Option<CancelReason>>>,
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelSignal {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            state: Arc::new(sender),
        }
    }

    /// Requests cancellation. Returns `false` if it was already requested.
    pub fn cancel(&self, reason: CancelReason) -> bool {
        self.state.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason);
            true
        })
    }

    #[must_use]
    pub fn reason(&self) -> Option<CancelReason> {
        *self.state.borrow()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.reason().is_some()
    }

    /// Resolves once cancellation is requested, immediately if it already was.
    pub async fn cancelled(&self) -> CancelReason {
        let mut receiver = self.state.subscribe();
        loop {
            let current = *receiver.borrow_and_update();
            if let Some(reason) = current {
                return reason;
            }
            if receiver.changed().await.is_err() {
                // The sender lives as long as `self`, so this never resolves.
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_reason_wins() {
        let signal = CancelSignal::new();
        assert!(!signal.is_cancelled());
        assert!(signal.cancel(CancelReason::Deadline));
        assert!(!signal.cancel(CancelReason::User));
        assert_eq!(signal.reason(), Some(CancelReason::Deadline));
    }

    #[test]
    fn clones_share_state() {
        let signal = CancelSignal::new();
        let clone = signal.clone();
        clone.cancel(CancelReason::User);
        assert_eq!(signal.reason(), Some(CancelReason::User));
    }

    #[tokio::test]
    async fn cancelled_resolves_immediately_when_already_cancelled() {
        let signal = CancelSignal::new();
        signal.cancel(CancelReason::User);
        assert_eq!(signal.cancelled().await, CancelReason::User);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_wakes_on_later_cancel() {
        let signal = CancelSignal::new();
        let trigger = signal.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            trigger.cancel(CancelReason::Deadline);
        });
        assert_eq!(signal.cancelled().await, CancelReason::Deadline);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_stays_pending_without_cancel() {
        let signal = CancelSignal::new();
        let waited = tokio::time::timeout(Duration::from_secs(60), signal.cancelled()).await;
        assert!(waited.is_err());
    }
}
