// SPDX-License-Identifier: MPL-2.0
//! The two hosted prediction services and their wire contracts.
//!
//! Each [`Service`] owns a form schema, the defaults the form starts with, and
//! the mapping from validated input to the JSON body the service expects.
//!
//! # Example
//!
//! ```
//! use agri_advisor::form::FormInput;
//! use agri_advisor::i18n::fluent::I18n;
//! use agri_advisor::recommendation::Service;
//!
//! let i18n = I18n::for_locale("en-US");
//! let input = Service::Crop
//!     .default_input()
//!     .with("Temperature", "25")
//!     .with("Humidity", "60")
//!     .with("Rainfall", "200")
//!     .with("PH", "6.5")
//!     .with("Nitrogen", "100")
//!     .with("Phosphorous", "50")
//!     .with("Potassium", "60")
//!     .with("Carbon", "1.2");
//!
//! let payload = Service::Crop.prepare(&input, &i18n).unwrap();
//! let body = serde_json::to_value(&payload).unwrap();
//! assert_eq!(body["soil"], "Loamy Soil");
//! assert_eq!(body["nitrogen"], 100);
//! ```

pub mod crop;
pub mod fertilizer;

pub use crop::CropRequest;
pub use fertilizer::FertilizerRequest;

use crate::form::{self, FormInput, FormSchema, ValidationErrors};
use crate::i18n::fluent::I18n;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Crop,
    Fertilizer,
}

impl Service {
    pub const ALL: [Service; 2] = [Service::Crop, Service::Fertilizer];

    /// Identifier used on the command line and in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Service::Crop => "crop",
            Service::Fertilizer => "fertilizer",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|service| service.name().eq_ignore_ascii_case(name.trim()))
    }

    #[must_use]
    pub fn schema(self) -> &'static FormSchema {
        match self {
            Service::Crop => &crop::SCHEMA,
            Service::Fertilizer => &fertilizer::SCHEMA,
        }
    }

    /// Initial form values: numeric fields blank, selectors preset.
    #[must_use]
    pub fn default_input(self) -> FormInput {
        match self {
            Service::Crop => FormInput::new().with("Soil", crop::DEFAULT_SOIL),
            Service::Fertilizer => FormInput::new()
                .with("SoilType", fertilizer::DEFAULT_SOIL_TYPE)
                .with("CropType", fertilizer::DEFAULT_CROP_TYPE),
        }
    }

    /// i18n key of the service name used inside messages.
    #[must_use]
    pub fn name_key(self) -> &'static str {
        match self {
            Service::Crop => "service-crop",
            Service::Fertilizer => "service-fertilizer",
        }
    }

    /// Field of the success response carrying the recommendation.
    #[must_use]
    pub fn result_field(self) -> &'static str {
        self.name()
    }

    /// i18n key used to present a successful result.
    #[must_use]
    pub fn result_key(self) -> &'static str {
        match self {
            Service::Crop => "result-crop",
            Service::Fertilizer => "result-fertilizer",
        }
    }

    /// Validates `input` and builds the request body.
    pub fn prepare(self, input: &FormInput, i18n: &I18n) -> Result<Payload, ValidationErrors> {
        let validated = form::check(input, self.schema(), i18n)?;
        Ok(match self {
            Service::Crop => Payload::Crop(CropRequest::from_validated(&validated)),
            Service::Fertilizer => Payload::Fertilizer(FertilizerRequest::from_validated(&validated)),
        })
    }

    /// Reads the recommendation out of a success body.
    ///
    /// A missing, null, or empty field gives `Ok(None)`. Numbers are accepted
    /// and rendered as text.
    pub fn extract_result(self, body: &str) -> Result<Option<String>, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        let result = match value.get(self.result_field()) {
            Some(serde_json::Value::String(text)) if !text.is_empty() => Some(text.clone()),
            Some(serde_json::Value::Number(number)) => Some(number.to_string()),
            _ => None,
        };
        Ok(result)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A request body for either service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Crop(CropRequest),
    Fertilizer(FertilizerRequest),
}
