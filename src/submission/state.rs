// SPDX-License-Identifier: MPL-2.0
//! Transient state of one recommendation form.

use super::status::slow_warning_text;
use crate::form::{FormInput, ValidationErrors};
use crate::i18n::fluent::I18n;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
struct InlineError {
    message: String,
    expires_at: Option<Instant>,
}

/// Everything a form shows besides its layout.
///
/// Only [`Controller`](super::Controller) moves it through a submission;
/// callers edit fields and read the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    input: FormInput,
    errors: ValidationErrors,
    result: Option<String>,
    show_result: bool,
    inline_error: Option<InlineError>,
    retry_count: u32,
    loading: bool,
    slow_warning: bool,
}

impl FormState {
    #[must_use]
    pub fn new(input: FormInput) -> Self {
        Self {
            input,
            ..Self::default()
        }
    }

    /// Stores a raw field value.
    ///
    /// Drops that field's validation error and hides any displayed result;
    /// errors of other fields stay.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) {
        self.input.set(field, value);
        self.errors.remove(field);
        if self.show_result {
            self.show_result = false;
            self.result = None;
        }
    }

    #[must_use]
    pub fn input(&self) -> &FormInput {
        &self.input
    }

    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Result text: the recommendation, or a placeholder after a failure.
    #[must_use]
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    #[must_use]
    pub fn show_result(&self) -> bool {
        self.show_result
    }

    #[must_use]
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn slow_warning(&self) -> bool {
        self.slow_warning
    }

    /// Inline error, unless it already cleared itself.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message_at(Instant::now())
    }

    #[must_use]
    pub fn error_message_at(&self, now: Instant) -> Option<&str> {
        self.inline_error
            .as_ref()
            .filter(|error| error.expires_at.is_none_or(|deadline| now < deadline))
            .map(|error| error.message.as_str())
    }

    /// The slow-backend hint, with the attempt number once a retry happened.
    #[must_use]
    pub fn slow_warning_hint(&self, i18n: &I18n) -> Option<String> {
        self.slow_warning
            .then(|| slow_warning_text(i18n, self.retry_count))
    }

    pub(super) fn reject(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    pub(super) fn begin(&mut self) {
        self.errors = ValidationErrors::default();
        self.loading = true;
        self.slow_warning = false;
        self.inline_error = None;
        self.show_result = false;
    }

    pub(super) fn mark_slow(&mut self) {
        self.slow_warning = true;
    }

    pub(super) fn succeed(&mut self, result: String) {
        self.finish();
        self.result = Some(result);
        self.show_result = true;
        self.retry_count = 0;
    }

    /// Records a failed attempt. `result` is the placeholder to keep, and
    /// `show_result` whether it stays visible.
    pub(super) fn fail(&mut self, message: String, expires_at: Option<Instant>, result: String, show_result: bool) {
        self.finish();
        self.retry_count += 1;
        self.inline_error = Some(InlineError { message, expires_at });
        self.result = Some(result);
        self.show_result = show_result;
    }

    fn finish(&mut self) {
        self.loading = false;
        self.slow_warning = false;
    }
}
