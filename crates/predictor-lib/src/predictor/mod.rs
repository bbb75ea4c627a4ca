//! Equipment failure prediction pipeline
//!
//! Request validation, the prompt template, the structured output schema,
//! the [`PredictionService`] that ties them to a [`GenerativeModel`], and
//! the [`PredictionAction`] the presentation layer calls.
//!
//! [`GenerativeModel`]: crate::model::GenerativeModel

mod action;
mod prompt;
mod service;
mod validation;

pub use action::PredictionAction;
pub use prompt::{output_schema, render_prompt};
pub use service::{PredictionError, PredictionService};
pub use validation::{validate, RequiredField, ValidationError};
