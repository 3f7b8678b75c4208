//! Validation Utilities

use validator::ValidationErrors;

use super::error::AppError;

/// Convert field-level validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let message = errors
        .field_errors()
        .iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| {
                format!(
                    "{}: {}",
                    field,
                    e.message.clone().map(|m| m.to_string()).unwrap_or_default()
                )
            })
        })
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation(message)
}
