// SPDX-License-Identifier: MPL-2.0
//! Sending request bodies to the prediction services.
//!
//! The [`Transport`] trait is the seam between submissions and the network:
//! [`HttpTransport`] talks to the real services, tests plug in scripted
//! implementations. Every call observes a [`CancelSignal`] so a submission
//! can abandon a request that outlived its ceiling.

mod cancel;
mod http;

pub use cancel::{CancelReason, CancelSignal};
pub use http::HttpTransport;

use serde::Serialize;
use std::future::Future;

/// A response that made it back, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` for any 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why no response came back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportFailure {
    #[error("request cancelled: {0}")]
    Cancelled(CancelReason),

    /// The client-level socket timeout elapsed.
    #[error("request timed out")]
    TimedOut,

    #[error("network error: {0}")]
    Network(String),
}

/// Posts JSON bodies and returns the raw reply.
pub trait Transport: Send + Sync {
    /// Sends `body` as JSON to `url`.
    ///
    /// Must return [`TransportFailure::Cancelled`] promptly once `cancel`
    /// fires, without waiting for the peer.
    fn post_json<B>(
        &self,
        url: &str,
        body: &B,
        cancel: &CancelSignal,
    ) -> impl Future<Output = Result<HttpReply, TransportFailure>> + Send
    where
        B: Serialize + Sync + ?Sized;
}
