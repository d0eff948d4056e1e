use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::api::shared::{ApiResponse, FieldErrors};
use crate::store::StoreError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} is required.")]
    MissingField(&'static str),

    #[error("Ensure this field has no more than {max_len} characters.")]
    TooLong {
        field: &'static str,
        max_len: usize,
    },

    #[error("Employee with this ID already exists.")]
    DuplicateIdentifier,

    #[error("Employee with this email already exists.")]
    DuplicateEmail,

    #[error("Cannot mark attendance for a future date.")]
    FutureDateRejected,

    #[error("{}", duplicate_attendance_message(.on_update))]
    DuplicateAttendance { on_update: bool },

    #[error("Status must be 'Present' or 'Absent'.")]
    InvalidStatus,

    #[error("Invalid employee \"{0}\" - object does not exist.")]
    UnknownEmployee(String),

    #[error("{0}")]
    MalformedPayload(String),

    /// Failures on several fields reported together.
    #[error("Validation failed")]
    Fields(FieldErrors),

    #[error("Record violates a uniqueness constraint.")]
    UniqueViolation,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

fn duplicate_attendance_message(on_update: &bool) -> &'static str {
    if *on_update {
        "Cannot update: Attendance already exists for this employee on the selected date."
    } else {
        "Attendance already marked for this employee on this date."
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::UniqueViolation => AppError::UniqueViolation,
            StoreError::Database(e) => AppError::Database(e),
        }
    }
}

impl AppError {
    /// Request field a validation failure is reported under, `None` for
    /// failures that are not about the request body.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AppError::MissingField(field) | AppError::TooLong { field, .. } => Some(*field),
            AppError::DuplicateIdentifier => Some("employee_id"),
            AppError::DuplicateEmail => Some("email"),
            AppError::FutureDateRejected | AppError::DuplicateAttendance { .. } => Some("date"),
            AppError::InvalidStatus => Some("status"),
            AppError::UnknownEmployee(_) => Some("employee"),
            AppError::MalformedPayload(_) | AppError::UniqueViolation => Some("non_field_errors"),
            AppError::Fields(_) | AppError::NotFound(_) | AppError::Database(_) => None,
        }
    }

    /// Merges field errors into one; a lone error is returned unchanged.
    pub fn combine(mut errors: Vec<AppError>) -> Option<AppError> {
        if errors.len() < 2 {
            return errors.pop();
        }

        let mut fields = FieldErrors::new();
        for error in &errors {
            for (field, mut messages) in error.field_errors().into_iter().flatten() {
                fields.entry(field).or_default().append(&mut messages);
            }
        }
        Some(AppError::Fields(fields))
    }

    pub fn field_errors(&self) -> Option<FieldErrors> {
        if let AppError::Fields(fields) = self {
            return Some(fields.clone());
        }

        self.field().map(|field| {
            let mut errors = FieldErrors::new();
            errors.insert(field.to_string(), vec![self.to_string()]);
            errors
        })
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // persistence failures are reported as client errors, same as validation
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        if let Some(errors) = self.field_errors() {
            tracing::warn!(status = %status_code, error = %self, "Validation failed");
            return HttpResponse::build(status_code).json(ApiResponse::validation_failed(errors));
        }

        if let AppError::Database(e) = self {
            tracing::error!(error = %e, "Database error");
        }

        HttpResponse::build(status_code).json(ApiResponse::message(self.to_string()))
    }
}
