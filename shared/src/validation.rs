//! Input validation functions
//!
//! Request structs carry `validator` derive rules; this module flattens
//! the result into a stable, ordered list of field errors.

use crate::errors::FieldError;
use validator::{Validate, ValidationErrors};

/// Validate a request, returning every failing field
pub fn validate_request<T: Validate>(request: &T) -> Result<(), Vec<FieldError>> {
    request.validate().map_err(|errors| field_errors(&errors))
}

/// Flatten `ValidationErrors` into `FieldError`s sorted by field name
///
/// Only the first failing rule per field is reported.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", err.code));
                FieldError::new(field.to_string(), message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}
