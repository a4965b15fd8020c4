// SPDX-License-Identifier: MPL-2.0
//! Scripted transport shared by the submission tests.

use agri_advisor::i18n::fluent::I18n;
use agri_advisor::notifications::Store;
use agri_advisor::recommendation::Service;
use agri_advisor::submission::{Controller, TimingPolicy};
use agri_advisor::transport::{CancelSignal, HttpReply, Transport, TransportFailure};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the next request experiences.
pub enum Step {
    /// Reply with `status` and `body` after `after`.
    Reply {
        after: Duration,
        status: u16,
        body: &'static str,
    },
    /// Fail without a reply after `after`.
    Fail {
        after: Duration,
        failure: TransportFailure,
    },
    /// Never answer; only cancellation ends the request.
    Hang,
}

/// Replays a script and records every body it was asked to send.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<Step>>>,
    sent: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
}

impl ScriptedTransport {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: Arc::new(Mutex::new(steps.into_iter().collect())),
            sent: Arc::default(),
        }
    }

    pub fn sent(&self) -> Vec<(String, serde_json::Value)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn post_json<B>(&self, url: &str, body: &B, cancel: &CancelSignal) -> Result<HttpReply, TransportFailure>
    where
        B: Serialize + Sync + ?Sized,
    {
        let value = serde_json::to_value(body).unwrap();
        self.sent.lock().unwrap().push((url.to_string(), value));
        let step = self.script.lock().unwrap().pop_front().unwrap_or(Step::Hang);

        let (after, result) = match step {
            Step::Reply { after, status, body } => (after, Ok(HttpReply::new(status, body))),
            Step::Fail { after, failure } => (after, Err(failure)),
            Step::Hang => (Duration::from_secs(24 * 60 * 60), Err(TransportFailure::TimedOut)),
        };

        tokio::select! {
            reason = cancel.cancelled() => Err(TransportFailure::Cancelled(reason)),
            () = tokio::time::sleep(after) => result,
        }
    }
}

pub fn reply(after_ms: u64, status: u16, body: &'static str) -> Step {
    Step::Reply {
        after: Duration::from_millis(after_ms),
        status,
        body,
    }
}

pub const ENDPOINT: &str = "http://service.test/predict";

pub fn crop_controller(transport: ScriptedTransport, store: Store) -> Controller<ScriptedTransport> {
    controller(Service::Crop, transport, store, TimingPolicy::default())
}

pub fn controller(
    service: Service,
    transport: ScriptedTransport,
    store: Store,
    policy: TimingPolicy,
) -> Controller<ScriptedTransport> {
    let mut controller = Controller::new(
        service,
        ENDPOINT,
        transport,
        store,
        Arc::new(I18n::for_locale("en-US")),
        policy,
    );
    let fields: &[(&str, &str)] = match service {
        Service::Crop => &[
            ("Temperature", "25"),
            ("Humidity", "60"),
            ("Rainfall", "200"),
            ("PH", "6.5"),
            ("Nitrogen", "100"),
            ("Phosphorous", "50"),
            ("Potassium", "60"),
            ("Carbon", "1.2"),
        ],
        Service::Fertilizer => &[
            ("Temparature", "30"),
            ("Humidity", "55"),
            ("Moisture", "40"),
            ("Nitrogen", "20"),
            ("Phosphorous", "10"),
            ("Potassium", "5"),
        ],
    };
    for (field, value) in fields {
        controller.set_field(field, *value);
    }
    controller
}
