use actix_web::web;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::AppError;

/// Field name -> messages, the shape every validation failure is reported in.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Response envelope shared by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl<T> ApiResponse<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            count: None,
            data: Some(data),
            errors: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    // List responses carry the number of returned records
    pub fn list(message: impl Into<String>, data: Vec<T>) -> Self {
        Self {
            message: message.into(),
            count: Some(data.len()),
            data: Some(data),
            errors: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            count: None,
            data: None,
            errors: None,
        }
    }

    pub fn validation_failed(errors: FieldErrors) -> Self {
        Self {
            message: "Validation failed".to_string(),
            count: None,
            data: None,
            errors: Some(errors),
        }
    }
}

/// Bodies that are not valid JSON for the target type are reported through
/// the same envelope as validation failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::MalformedPayload(err.to_string()).into())
}

/// A path segment that does not parse as the resource's key cannot name an
/// existing record, so it is reported as `resource` not found.
pub fn path_config(resource: &'static str) -> web::PathConfig {
    web::PathConfig::default().error_handler(move |_err, _req| AppError::NotFound(resource).into())
}
