// SPDX-License-Identifier: MPL-2.0
//! Crop recommendation form and wire body.

use crate::form::{CategoricalField, FieldRule, FormSchema, ValidatedInput};
use serde::Serialize;

/// Soil labels offered by the crop form, sent to the service as-is.
pub const SOIL_OPTIONS: &[&str] = &["Loamy Soil", "Peaty Soil", "Acidic Soil", "Neutral Soil", "Alkaline Soil"];

pub const DEFAULT_SOIL: &str = "Loamy Soil";

const NUMERIC: &[FieldRule] = &[
    FieldRule {
        key: "Temperature",
        label_key: "field-temperature",
        min: 0.0,
        max: 55.0,
        unit: "°C",
    },
    FieldRule {
        key: "Humidity",
        label_key: "field-humidity",
        min: 10.0,
        max: 100.0,
        unit: "%",
    },
    FieldRule {
        key: "Rainfall",
        label_key: "field-rainfall",
        min: 0.0,
        max: 3000.0,
        unit: "mm",
    },
    FieldRule {
        key: "PH",
        label_key: "field-ph",
        min: 0.0,
        max: 14.0,
        unit: "",
    },
    FieldRule {
        key: "Nitrogen",
        label_key: "field-nitrogen",
        min: 0.0,
        max: 300.0,
        unit: "kg/ha",
    },
    FieldRule {
        key: "Phosphorous",
        label_key: "field-phosphorous",
        min: 0.0,
        max: 150.0,
        unit: "kg/ha",
    },
    FieldRule {
        key: "Potassium",
        label_key: "field-potassium",
        min: 0.0,
        max: 200.0,
        unit: "kg/ha",
    },
    FieldRule {
        key: "Carbon",
        label_key: "field-carbon",
        min: 0.0,
        max: 5.0,
        unit: "%",
    },
];

const CATEGORICAL: &[CategoricalField] = &[CategoricalField {
    key: "Soil",
    label_key: "field-soil",
    options: SOIL_OPTIONS,
}];

pub const SCHEMA: FormSchema = FormSchema {
    numeric: NUMERIC,
    categorical: CATEGORICAL,
};

/// Body of `POST /predict` on the crop service.
///
/// Nutrient amounts are integers on the wire; fractional input is truncated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropRequest {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub ph: f64,
    pub nitrogen: i64,
    pub phosphorous: i64,
    pub potassium: i64,
    pub carbon: f64,
    pub soil: String,
}

impl CropRequest {
    #[must_use]
    pub fn from_validated(input: &ValidatedInput) -> Self {
        Self {
            temperature: input.number("Temperature"),
            humidity: input.number("Humidity"),
            rainfall: input.number("Rainfall"),
            ph: input.number("PH"),
            nitrogen: input.integer("Nitrogen"),
            phosphorous: input.integer("Phosphorous"),
            potassium: input.integer("Potassium"),
            carbon: input.number("Carbon"),
            soil: input.choice("Soil").to_string(),
        }
    }
}
