// SPDX-License-Identifier: MPL-2.0
//! Drives one form from validation to a settled outcome.

use super::outcome::SubmissionOutcome;
use super::policy::TimingPolicy;
use super::state::FormState;
use super::status::{Phase, Status};
use crate::form::ValidationErrors;
use crate::i18n::fluent::I18n;
use crate::notifications::{Content, Kind, Store};
use crate::recommendation::{Payload, Service};
use crate::transport::{CancelReason, CancelSignal, HttpReply, Transport, TransportFailure};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Submission controller of one form.
///
/// `submit` borrows the controller mutably, so a form never has two
/// requests in flight. Failures are reported twice: as an inline message in
/// [`FormState`] and as an error notification in the shared [`Store`].
pub struct Controller<T> {
    service: Service,
    endpoint: String,
    transport: T,
    store: Store,
    i18n: Arc<I18n>,
    policy: TimingPolicy,
    state: FormState,
    status: Arc<watch::Sender<Status>>,
    error_clear: Option<JoinHandle<()>>,
}

impl<T: Transport> Controller<T> {
    pub fn new(
        service: Service,
        endpoint: impl Into<String>,
        transport: T,
        store: Store,
        i18n: Arc<I18n>,
        policy: TimingPolicy,
    ) -> Self {
        let (status, _) = watch::channel(Status::default());
        Self {
            service,
            endpoint: endpoint.into(),
            transport,
            store,
            i18n,
            policy,
            state: FormState::new(service.default_input()),
            status: Arc::new(status),
            error_clear: None,
        }
    }

    #[must_use]
    pub fn service(&self) -> Service {
        self.service
    }

    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    #[must_use]
    pub fn policy(&self) -> TimingPolicy {
        self.policy
    }

    pub fn set_field(&mut self, field: &str, value: impl Into<String>) {
        self.state.set_field(field, value);
    }

    #[must_use]
    pub fn status(&self) -> Status {
        *self.status.borrow()
    }

    /// Receiver of every status transition, including the slow-warning flip
    /// and the inline error clearing itself.
    #[must_use]
    pub fn watch_status(&self) -> watch::Receiver<Status> {
        self.status.subscribe()
    }

    pub async fn submit(&mut self) -> Result<SubmissionOutcome, ValidationErrors> {
        self.submit_with(CancelSignal::new()).await
    }

    /// Validates and sends the form, observing `cancel`.
    ///
    /// Returns the field errors without sending anything when validation
    /// fails. Otherwise always settles with exactly one outcome.
    pub async fn submit_with(&mut self, cancel: CancelSignal) -> Result<SubmissionOutcome, ValidationErrors> {
        self.publish(Phase::Validating);

        let payload = match self.service.prepare(self.state.input(), &self.i18n) {
            Ok(payload) => payload,
            Err(errors) => {
                tracing::debug!(service = %self.service, fields = errors.len(), "submission rejected by validation");
                self.state.reject(errors.clone());
                self.publish(Phase::Idle);
                return Err(errors);
            }
        };

        self.cancel_error_clear();
        self.state.begin();
        self.publish(Phase::InFlight);
        tracing::info!(service = %self.service, attempt = self.status().attempt(), "submitting");

        let started = Instant::now();
        let result = self.race(&payload, &cancel).await;
        let outcome = SubmissionOutcome::from_transport(self.service, result, &self.i18n);
        self.settle(&outcome, started);
        Ok(outcome)
    }

    /// Runs the request against the slow-warning and ceiling timers.
    ///
    /// The timers live in this frame, so settling drops them.
    async fn race(&mut self, payload: &Payload, cancel: &CancelSignal) -> Result<HttpReply, TransportFailure> {
        let request = self.transport.post_json(&self.endpoint, payload, cancel);
        let cancelled = cancel.cancelled();
        let slow = tokio::time::sleep(self.policy.slow_warning);
        let ceiling = tokio::time::sleep(self.policy.hard_timeout.unwrap_or_default());
        tokio::pin!(request, cancelled, slow, ceiling);

        let mut slow_fired = false;
        let mut ceiling_armed = self.policy.hard_timeout.is_some();

        loop {
            tokio::select! {
                biased;
                result = &mut request => return result,
                reason = &mut cancelled => return Err(TransportFailure::Cancelled(reason)),
                () = &mut ceiling, if ceiling_armed => {
                    ceiling_armed = false;
                    tracing::warn!(service = %self.service, "hard ceiling reached, cancelling request");
                    cancel.cancel(CancelReason::Deadline);
                }
                () = &mut slow, if !slow_fired => {
                    slow_fired = true;
                    self.state.mark_slow();
                    self.publish(Phase::InFlight);
                    tracing::warn!(service = %self.service, attempt = self.status().attempt(), "service is slow to answer");
                }
            }
        }
    }

    fn settle(&mut self, outcome: &SubmissionOutcome, started: Instant) {
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match outcome {
            SubmissionOutcome::Success { result } => {
                self.state.succeed(result.clone());
                tracing::info!(service = %self.service, elapsed_ms, "recommendation received");
            }
            failure => {
                let message = failure.error_message(self.service, &self.i18n).unwrap_or_default();
                let expires_at = self.policy.error_clear_after.map(|delay| Instant::now() + delay);
                let (placeholder, show_result) = match failure {
                    SubmissionOutcome::EmptyResult { fallback } => (fallback.clone(), true),
                    _ => (self.i18n.tr("result-error-placeholder"), false),
                };
                self.state.fail(message, expires_at, placeholder, show_result);
                if let Some(deadline) = expires_at {
                    self.schedule_error_clear(deadline);
                }
                self.notify_failure();
                tracing::warn!(
                    service = %self.service,
                    outcome = failure.label(),
                    retry_count = self.state.retry_count(),
                    elapsed_ms,
                    "submission failed"
                );
            }
        }

        self.publish(Phase::Settled);
    }

    /// Republishes the status once the inline error expires, so watchers
    /// see it go without polling.
    fn schedule_error_clear(&mut self, deadline: Instant) {
        self.cancel_error_clear();
        let status = Arc::clone(&self.status);
        self.error_clear = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            status.send_if_modified(|status| std::mem::take(&mut status.inline_error));
        }));
    }

    fn cancel_error_clear(&mut self) {
        if let Some(task) = self.error_clear.take() {
            task.abort();
        }
    }

    fn notify_failure(&self) {
        let service_name = self.i18n.tr(self.service.name_key());
        let content = Content::titled(
            self.i18n.tr("toast-error-title"),
            self.i18n
                .tr_with_args("toast-error-description", &[("service", &service_name)]),
        );
        self.store.notify(content, Kind::Error, None);
    }

    fn publish(&self, phase: Phase) {
        self.status.send_replace(Status {
            phase,
            slow_warning: self.state.slow_warning(),
            retry_count: self.state.retry_count(),
            inline_error: self.state.error_message().is_some(),
        });
    }
}

impl<T> Drop for Controller<T> {
    fn drop(&mut self) {
        if let Some(task) = self.error_clear.take() {
            task.abort();
        }
    }
}
