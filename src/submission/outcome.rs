// SPDX-License-Identifier: MPL-2.0
use crate::i18n::fluent::I18n;
use crate::recommendation::Service;
use crate::transport::{CancelReason, HttpReply, TransportFailure};

/// How a submission that passed validation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// 2xx with a usable recommendation.
    Success { result: String },
    /// 2xx but the recommendation field was missing or empty. `fallback` is
    /// the placeholder shown in its place.
    EmptyResult { fallback: String },
    /// Non-2xx reply, an unreadable 2xx body, or no reply at all (`status`
    /// is `None` for connection-level failures). `body` is `None` when the
    /// server sent nothing readable.
    TransportError {
        status: Option<u16>,
        body: Option<String>,
    },
    /// The hard ceiling or the client socket timeout elapsed.
    Timeout,
    /// Cancelled from outside the submission.
    Aborted,
}

impl SubmissionOutcome {
    /// Maps a transport result onto an outcome for `service`.
    #[must_use]
    pub fn from_transport(service: Service, result: Result<HttpReply, TransportFailure>, i18n: &I18n) -> Self {
        match result {
            Ok(reply) if reply.is_success() => match service.extract_result(&reply.body) {
                Ok(Some(result)) => Self::Success { result },
                Ok(None) => Self::EmptyResult {
                    fallback: i18n.tr("result-fallback"),
                },
                Err(_) => Self::rejected(reply),
            },
            Ok(reply) => Self::rejected(reply),
            Err(TransportFailure::Cancelled(CancelReason::Deadline) | TransportFailure::TimedOut) => Self::Timeout,
            Err(TransportFailure::Cancelled(CancelReason::User)) => Self::Aborted,
            Err(TransportFailure::Network(message)) => Self::TransportError {
                status: None,
                body: Some(message),
            },
        }
    }

    fn rejected(reply: HttpReply) -> Self {
        Self::TransportError {
            status: Some(reply.status),
            body: Some(reply.body).filter(|body| !body.is_empty()),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Short name for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::EmptyResult { .. } => "empty-result",
            Self::TransportError { .. } => "transport-error",
            Self::Timeout => "timeout",
            Self::Aborted => "aborted",
        }
    }

    /// Form-local error text, `None` on success.
    #[must_use]
    pub fn error_message(&self, service: Service, i18n: &I18n) -> Option<String> {
        let service_name = i18n.tr(service.name_key());
        let message = match self {
            Self::Success { .. } => return None,
            Self::EmptyResult { .. } => i18n.tr_with_args("error-empty-result", &[("service", &service_name)]),
            Self::TransportError {
                status: Some(status),
                body: Some(body),
            } => {
                let status = status.to_string();
                i18n.tr_with_args("error-http", &[("status", &status), ("body", body)])
            }
            Self::TransportError {
                status: Some(status),
                body: None,
            } => {
                let status = status.to_string();
                i18n.tr_with_args("error-http-status", &[("status", &status)])
            }
            Self::TransportError { status: None, .. } => {
                i18n.tr_with_args("error-network", &[("service", &service_name)])
            }
            Self::Timeout => i18n.tr("error-timeout"),
            Self::Aborted => i18n.tr("error-aborted"),
        };
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(result: Result<HttpReply, TransportFailure>) -> SubmissionOutcome {
        SubmissionOutcome::from_transport(Service::Crop, result, &I18n::for_locale("en-US"))
    }

    #[test]
    fn success_requires_2xx_and_result_field() {
        assert_eq!(
            outcome(Ok(HttpReply::new(200, r#"{"crop":"maize"}"#))),
            SubmissionOutcome::Success {
                result: "maize".into()
            }
        );
        assert_eq!(
            outcome(Ok(HttpReply::new(200, "{}"))),
            SubmissionOutcome::EmptyResult {
                fallback: "Unable to generate recommendation".into()
            }
        );
    }

    #[test]
    fn empty_error_body_is_not_reported() {
        let empty = outcome(Ok(HttpReply::new(503, "")));
        assert_eq!(
            empty,
            SubmissionOutcome::TransportError {
                status: Some(503),
                body: None
            }
        );
        assert_eq!(
            empty.error_message(Service::Crop, &I18n::for_locale("en-US")).as_deref(),
            Some("Failed to get recommendation: HTTP error! status: 503")
        );
    }

    #[test]
    fn non_success_status_keeps_body() {
        assert_eq!(
            outcome(Ok(HttpReply::new(502, "Bad Gateway"))),
            SubmissionOutcome::TransportError {
                status: Some(502),
                body: Some("Bad Gateway".into())
            }
        );
    }

    #[test]
    fn unreadable_success_body_is_transport_error() {
        assert_eq!(
            outcome(Ok(HttpReply::new(200, "<html>"))),
            SubmissionOutcome::TransportError {
                status: Some(200),
                body: Some("<html>".into())
            }
        );
    }

    #[test]
    fn cancellation_reason_picks_variant() {
        assert_eq!(
            outcome(Err(TransportFailure::Cancelled(CancelReason::Deadline))),
            SubmissionOutcome::Timeout
        );
        assert_eq!(outcome(Err(TransportFailure::TimedOut)), SubmissionOutcome::Timeout);
        assert_eq!(
            outcome(Err(TransportFailure::Cancelled(CancelReason::User))),
            SubmissionOutcome::Aborted
        );
    }

    #[test]
    fn network_failure_has_no_status() {
        assert_eq!(
            outcome(Err(TransportFailure::Network("dns".into()))),
            SubmissionOutcome::TransportError {
                status: None,
                body: Some("dns".into())
            }
        );
    }

    #[test]
    fn error_messages_per_variant() {
        let i18n = I18n::for_locale("en-US");
        let message = |o: SubmissionOutcome| o.error_message(Service::Fertilizer, &i18n);

        assert_eq!(
            message(SubmissionOutcome::Success { result: "x".into() }),
            None
        );
        assert_eq!(
            message(SubmissionOutcome::EmptyResult {
                fallback: "Unable to generate recommendation".into()
            })
            .as_deref(),
            Some("Unable to generate fertilizer recommendation. Please check your inputs.")
        );
        assert_eq!(
            message(SubmissionOutcome::TransportError {
                status: Some(500),
                body: Some("boom".into())
            })
            .as_deref(),
            Some("Failed to get recommendation: HTTP error! status: 500, message: boom")
        );
        assert_eq!(
            message(SubmissionOutcome::TransportError {
                status: None,
                body: None
            })
            .as_deref(),
            Some("Failed to get fertilizer recommendation. The service might be sleeping - please try again.")
        );
        assert_eq!(
            message(SubmissionOutcome::Timeout).as_deref(),
            Some("Request timed out. Please try again.")
        );
        assert_eq!(message(SubmissionOutcome::Aborted).as_deref(), Some("Request cancelled."));
    }
}
