// SPDX-License-Identifier: MPL-2.0
//! Form input and the validation gate in front of every submission.

mod input;
mod schema;
pub mod validation;

pub use input::FormInput;
pub use schema::{CategoricalField, FieldRule, FormSchema};
pub use validation::{check, validate, ValidatedInput, ValidationErrors};
