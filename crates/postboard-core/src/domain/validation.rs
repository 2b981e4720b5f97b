//! Payload validation rules.

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{DomainError, FieldViolation};

pub const BLANK_FIELD: &str = "Field cannot be an empty string or whitespace.";
pub const SINGLE_CHAR_FIELD: &str = "Field cannot be a sequence of a single character.";
pub const TITLE_TOO_LONG: &str = "Title must be at most 100 characters.";

/// Text rule shared by titles and contents: not blank and made of at least
/// two distinct characters.
pub fn is_text(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed(BLANK_FIELD)));
    }

    let mut chars = value.chars();
    let first = chars.next();
    if chars.all(|c| Some(c) == first) {
        return Err(
            ValidationError::new("single_char").with_message(Cow::Borrowed(SINGLE_CHAR_FIELD))
        );
    }

    Ok(())
}

/// Runs the derived validators and folds failures into `DomainError::Validation`.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), DomainError> {
    payload
        .validate()
        .map_err(|errors| DomainError::Validation(violations(&errors)))
}

fn violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| FieldViolation {
                field: field.to_string(),
                message: err
                    .message
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| err.code.to_string()),
            })
        })
        .collect();
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}
