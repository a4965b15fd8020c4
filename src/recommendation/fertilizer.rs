// SPDX-License-Identifier: MPL-2.0
//! Fertilizer recommendation form and wire body.
//!
//! The service expects the `Temparature` spelling and keys containing spaces.
//! Form keys follow the wire names where they can so that CLI users type the
//! same names the service documents.

use crate::form::{CategoricalField, FieldRule, FormSchema, ValidatedInput};
use serde::Serialize;

pub const SOIL_TYPES: &[&str] = &["Sandy", "Loamy", "Black", "Red", "Clayey"];

pub const CROP_TYPES: &[&str] = &[
    "Wheat",
    "Barley",
    "Maize",
    "Rice",
    "Cotton",
    "Sugarcane",
    "Millets",
    "Oil seeds",
    "Pulses",
];

pub const DEFAULT_SOIL_TYPE: &str = "Sandy";
pub const DEFAULT_CROP_TYPE: &str = "Wheat";

const NUMERIC: &[FieldRule] = &[
    FieldRule {
        key: "Temparature",
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
        key: "Moisture",
        label_key: "field-moisture",
        min: 10.0,
        max: 100.0,
        unit: "%",
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
];

const CATEGORICAL: &[CategoricalField] = &[
    CategoricalField {
        key: "SoilType",
        label_key: "field-soil-type",
        options: SOIL_TYPES,
    },
    CategoricalField {
        key: "CropType",
        label_key: "field-crop-type",
        options: CROP_TYPES,
    },
];

pub const SCHEMA: FormSchema = FormSchema {
    numeric: NUMERIC,
    categorical: CATEGORICAL,
};

/// Body of `POST /predict` on the fertilizer service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FertilizerRequest {
    #[serde(rename = "Temparature")]
    pub temperature: f64,
    #[serde(rename = "Humidity")]
    pub humidity: f64,
    #[serde(rename = "Moisture")]
    pub moisture: f64,
    #[serde(rename = "Soil Type")]
    pub soil_type: String,
    #[serde(rename = "Crop Type")]
    pub crop_type: String,
    #[serde(rename = "Nitrogen")]
    pub nitrogen: i64,
    #[serde(rename = "Phosphorous")]
    pub phosphorous: i64,
    #[serde(rename = "Potassium")]
    pub potassium: i64,
}

impl FertilizerRequest {
    #[must_use]
    pub fn from_validated(input: &ValidatedInput) -> Self {
        Self {
            temperature: input.number("Temparature"),
            humidity: input.number("Humidity"),
            moisture: input.number("Moisture"),
            soil_type: input.choice("SoilType").to_string(),
            crop_type: input.choice("CropType").to_string(),
            nitrogen: input.integer("Nitrogen"),
            phosphorous: input.integer("Phosphorous"),
            potassium: input.integer("Potassium"),
        }
    }
}
