// SPDX-License-Identifier: MPL-2.0
//! Raw form input: field name to the string the user typed or picked.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    values: BTreeMap<String, String>,
}

impl FormInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the raw value of `field`, replacing any previous one.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Raw value of `field`, if it was ever set.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parses `Name=value` pairs as given on a command line.
    ///
    /// Only the first `=` separates; the value may contain further `=` and
    /// spaces. Returns the offending argument when one has no `=`.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut input = Self::new();
        input.merge_pairs(pairs)?;
        Ok(input)
    }

    /// Like [`FormInput::from_pairs`], applied on top of the current values.
    pub fn merge_pairs<I, S>(&mut self, pairs: I) -> Result<(), String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pair in pairs {
            let pair = pair.as_ref();
            match pair.split_once('=') {
                Some((field, value)) if !field.trim().is_empty() => {
                    self.set(field.trim(), value);
                }
                _ => return Err(pair.to_string()),
            }
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for FormInput
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut input = Self::new();
        for (field, value) in iter {
            input.set(field, value);
        }
        input
    }
}
