//! # Field validation and controllers
//!
//! One [`controller::FieldController`] exists per schema field. On every change event it reads
//! the widget, runs [`validate`] synchronously and either rejects the edit (inline error, shared
//! display suspended) or writes the value into the parameter store and issues a submission.
//!
//! ## Validation rules
//!
//! 1. Empty input is rejected with a kind-specific message.
//! 2. Numeric fields only, first match wins:
//!    not a finite number, `<= min` (exclusive), `< min` (inclusive),
//!    `>= max` (exclusive), `> max` (inclusive).
//!
//! Date and time fields only go through rule 1.
pub mod controller;
pub mod widget;

use thiserror::Error;

use crate::parameters::{store::ParamValue, FieldDescriptor, InputKind};

/// Reason an input was rejected. The `Display` text is the inline message without its prefix.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Enter a valid date")]
    DateRequired,

    #[error("Enter a valid time")]
    TimeRequired,

    #[error("Value required")]
    ValueRequired,

    #[error("Enter a valid number")]
    NotANumber,

    #[error("Enter a value > {0}")]
    NotAboveMin(f64),

    #[error("Enter a value ≥ {0}")]
    BelowMin(f64),

    #[error("Enter a value < {0}")]
    NotBelowMax(f64),

    #[error("Enter a value ≤ {0}")]
    AboveMax(f64),
}

impl ValidationError {
    /// Whether the rejection comes from the empty-input rule.
    pub fn is_required_value(&self) -> bool {
        matches!(
            self,
            ValidationError::DateRequired
                | ValidationError::TimeRequired
                | ValidationError::ValueRequired
        )
    }
}

/// Validate the value reported by a widget against its descriptor.
///
/// Arguments
/// ---------
/// * `desc`: the schema entry of the field
/// * `value`: the text reported by the widget (see [`widget::FieldWidget::read`])
///
/// Return
/// ------
/// * the value to store: a number for numeric fields, the text itself for date/time fields
/// * a [`ValidationError`] naming the first rule that rejected the input
pub fn validate(desc: &FieldDescriptor, value: &str) -> Result<ParamValue, ValidationError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(match desc.kind {
            InputKind::Date => ValidationError::DateRequired,
            InputKind::Time => ValidationError::TimeRequired,
            InputKind::Number => ValidationError::ValueRequired,
        });
    }

    if desc.kind != InputKind::Number {
        return Ok(ParamValue::Text(value.to_string()));
    }

    let number = value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or(ValidationError::NotANumber)?;

    if let Some(min) = desc.min {
        if !min.inclusive && number <= min.value {
            return Err(ValidationError::NotAboveMin(min.value));
        }
        if min.inclusive && number < min.value {
            return Err(ValidationError::BelowMin(min.value));
        }
    }

    if let Some(max) = desc.max {
        if !max.inclusive && number >= max.value {
            return Err(ValidationError::NotBelowMax(max.value));
        }
        if max.inclusive && number > max.value {
            return Err(ValidationError::AboveMax(max.value));
        }
    }

    Ok(ParamValue::Number(number))
}
