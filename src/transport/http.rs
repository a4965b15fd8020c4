// SPDX-License-Identifier: MPL-2.0
//! `reqwest`-backed transport.

use super::{CancelSignal, HttpReply, Transport, TransportFailure};
use crate::error::Result;
use serde::Serialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("AgriAdvisor/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a client with a bounded redirect policy and our user agent.
    ///
    /// `timeout` is a socket-level fallback; submissions enforce their own
    /// ceiling through the cancel signal.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?))
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn post_json<B>(&self, url: &str, body: &B, cancel: &CancelSignal) -> std::result::Result<HttpReply, TransportFailure>
    where
        B: Serialize + Sync + ?Sized,
    {
        let request = self.client.post(url).json(body);

        let exchange = async move {
            let response = request.send().await.map_err(classify)?;
            let status = response.status();
            let body = match response.text().await {
                Ok(text) => text,
                // Error bodies are informational only.
                Err(_) if !status.is_success() => String::new(),
                Err(e) => return Err(classify(e)),
            };
            Ok(HttpReply {
                status: status.as_u16(),
                body,
            })
        };

        tokio::select! {
            biased;
            reason = cancel.cancelled() => {
                tracing::debug!(url, %reason, "request abandoned");
                Err(TransportFailure::Cancelled(reason))
            }
            reply = exchange => reply,
        }
    }
}

fn classify(err: reqwest::Error) -> TransportFailure {
    if err.is_timeout() {
        TransportFailure::TimedOut
    } else {
        TransportFailure::Network(err.to_string())
    }
}
