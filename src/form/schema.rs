// SPDX-License-Identifier: MPL-2.0
//! Constraint tables describing what a form accepts.

/// A required numeric field with an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    /// Field name in [`FormInput`](super::FormInput).
    pub key: &'static str,
    /// i18n key of the human-readable label.
    pub label_key: &'static str,
    pub min: f64,
    pub max: f64,
    /// Unit shown next to the label, empty when unitless.
    pub unit: &'static str,
}

impl FieldRule {
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// A required field picked from a closed list.
///
/// Only non-emptiness is checked; the options feed selectors and help output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoricalField {
    pub key: &'static str,
    pub label_key: &'static str,
    pub options: &'static [&'static str],
}

/// All constraints of one form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormSchema {
    pub numeric: &'static [FieldRule],
    pub categorical: &'static [CategoricalField],
}

impl FormSchema {
    #[must_use]
    pub fn rule(&self, key: &str) -> Option<&FieldRule> {
        self.numeric.iter().find(|rule| rule.key == key)
    }

    #[must_use]
    pub fn choice(&self, key: &str) -> Option<&CategoricalField> {
        self.categorical.iter().find(|field| field.key == key)
    }

    /// Every field name, numeric ones first.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.numeric
            .iter()
            .map(|rule| rule.key)
            .chain(self.categorical.iter().map(|field| field.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &[FieldRule] = &[FieldRule {
        key: "PH",
        label_key: "field-ph",
        min: 0.0,
        max: 14.0,
        unit: "",
    }];
    const CHOICES: &[CategoricalField] = &[CategoricalField {
        key: "Soil",
        label_key: "field-soil",
        options: &["Sandy", "Loamy"],
    }];
    const SCHEMA: FormSchema = FormSchema {
        numeric: RULES,
        categorical: CHOICES,
    };

    #[test]
    fn range_is_inclusive() {
        let rule = SCHEMA.rule("PH").unwrap();
        assert!(rule.contains(0.0));
        assert!(rule.contains(14.0));
        assert!(!rule.contains(14.01));
        assert!(!rule.contains(-0.1));
    }

    #[test]
    fn lookups_by_key() {
        assert!(SCHEMA.rule("Soil").is_none());
        assert_eq!(SCHEMA.choice("Soil").map(|c| c.options.len()), Some(2));
        assert_eq!(SCHEMA.keys().collect::<Vec<_>>(), vec!["PH", "Soil"]);
    }
}
