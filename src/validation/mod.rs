//! Rules applied to request data before anything is persisted.

pub mod attendance;
pub mod employee;

use crate::error::{AppError, AppResult};

/// Returns the trimmed value, or `MissingField` if it is absent or blank.
pub(crate) fn required(field: &'static str, value: Option<&str>) -> AppResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::MissingField(field)),
    }
}

/// `required`, plus a limit on the trimmed length in characters matching the
/// column width.
pub(crate) fn required_max(
    field: &'static str,
    value: Option<&str>,
    max_len: usize,
) -> AppResult<String> {
    let value = required(field, value)?;
    if value.chars().count() > max_len {
        return Err(AppError::TooLong { field, max_len });
    }
    Ok(value)
}
