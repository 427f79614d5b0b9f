//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    PayloadTooLarge(String),
}

impl AppError {
    pub fn user_not_found() -> Self {
        AppError::NotFound("User not found".into())
    }

    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::Db(sqlx::Error::RowNotFound) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Attached to every error response so the error layer can re-render it.
#[derive(Clone, Debug)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub diagnostic: String,
}

impl ErrorReport {
    pub fn body(&self, with_details: bool) -> ErrorBody {
        ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message.clone(),
                details: with_details.then(|| serde_json::Value::String(self.diagnostic.clone())),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let report = ErrorReport {
            status,
            code,
            message: self.to_string(),
            diagnostic: format!("{:?}", self),
        };
        let mut response = (status, Json(report.body(false))).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status() {
        assert_eq!(AppError::user_not_found().status_and_code().0, StatusCode::NOT_FOUND);
        assert_eq!(AppError::Validation("x".into()).status_and_code().0, StatusCode::BAD_REQUEST);
        assert_eq!(AppError::BadRequest("x".into()).status_and_code().0, StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::PayloadTooLarge("x".into()).status_and_code().0,
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::Db(sqlx::Error::PoolTimedOut).status_and_code().0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::Db(sqlx::Error::RowNotFound).status_and_code().0, StatusCode::NOT_FOUND);
    }

    #[test]
    fn response_carries_report_and_hides_details() {
        let response = AppError::Validation("email is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.code, "validation_error");
        assert_eq!(report.message, "email is required");

        let body = serde_json::to_value(report.body(false)).unwrap();
        assert!(body["error"].get("details").is_none());
        let body = serde_json::to_value(report.body(true)).unwrap();
        assert!(body["error"]["details"].as_str().unwrap().contains("Validation"));
    }
}
