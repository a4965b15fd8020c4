// SPDX-License-Identifier: MPL-2.0
//! The validation gate.
//!
//! [`check`] turns raw input into either parsed values or a map of
//! per-field messages. It is pure: the same input, schema, and locale always
//! give the same result, so callers can re-run it instead of caching validity.
//!
//! Each field gets at most one message, picked by the first failing rule:
//!
//! 1. missing or blank → "required"
//! 2. not a finite number → "must be a valid number"
//! 3. outside `[min, max]` → "must be between"
//!
//! Categorical fields only have to be non-blank.

use super::input::FormInput;
use super::schema::{FieldRule, FormSchema};
use crate::i18n::fluent::I18n;
use std::collections::BTreeMap;
use std::fmt;

/// Field name → message. Empty means the input is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Drops the message of one field, e.g. after the user edits it.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, field: &str, message: String) {
        self.0.insert(field.to_string(), message);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (field, message)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Values of an input that passed the gate.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    numbers: BTreeMap<&'static str, f64>,
    choices: BTreeMap<&'static str, String>,
}

impl ValidatedInput {
    /// Parsed value of a numeric field of the schema.
    #[must_use]
    pub fn number(&self, key: &str) -> f64 {
        self.numbers.get(key).copied().unwrap_or_default()
    }

    /// Numeric field truncated toward zero, for integer wire fields.
    #[must_use]
    pub fn integer(&self, key: &str) -> i64 {
        // Range checks already bound the value, so the cast cannot saturate.
        self.number(key).trunc() as i64
    }

    /// Selected option of a categorical field, as entered.
    #[must_use]
    pub fn choice(&self, key: &str) -> &str {
        self.choices.get(key).map_or("", String::as_str)
    }
}

/// Parses a raw field as a finite number. Surrounding whitespace is ignored.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Runs the gate and returns only the error map.
#[must_use]
pub fn validate(input: &FormInput, schema: &FormSchema, i18n: &I18n) -> ValidationErrors {
    check(input, schema, i18n).err().unwrap_or_default()
}

/// Runs the gate, returning parsed values when every field passes.
pub fn check(input: &FormInput, schema: &FormSchema, i18n: &I18n) -> Result<ValidatedInput, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let mut numbers = BTreeMap::new();
    let mut choices = BTreeMap::new();

    for rule in schema.numeric {
        match check_numeric(input.get(rule.key), rule, i18n) {
            Ok(value) => {
                numbers.insert(rule.key, value);
            }
            Err(message) => errors.insert(rule.key, message),
        }
    }

    for field in schema.categorical {
        match input.get(field.key).filter(|value| !value.trim().is_empty()) {
            Some(value) => {
                choices.insert(field.key, value.to_string());
            }
            None => {
                let label = i18n.tr(field.label_key);
                errors.insert(field.key, i18n.tr_with_args("validation-required", &[("label", &label)]));
            }
        }
    }

    if errors.is_empty() {
        Ok(ValidatedInput { numbers, choices })
    } else {
        Err(errors)
    }
}

fn check_numeric(raw: Option<&str>, rule: &FieldRule, i18n: &I18n) -> Result<f64, String> {
    let label = i18n.tr(rule.label_key);

    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return Err(i18n.tr_with_args("validation-required", &[("label", &label)]));
    };

    let Some(value) = parse_number(raw) else {
        return Err(i18n.tr_with_args("validation-not-a-number", &[("label", &label)]));
    };

    if !rule.contains(value) {
        let min = rule.min.to_string();
        let max = rule.max.to_string();
        return Err(i18n.tr_with_args(
            "validation-out-of-range",
            &[("label", &label), ("min", &min), ("max", &max)],
        ));
    }

    Ok(value)
}
