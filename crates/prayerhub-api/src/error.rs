//! Maps domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use validator::{ValidationErrors, ValidationErrorsKind};

use prayerhub_core::error::{AppError, ErrorKind};
use prayerhub_service::{AdmissionError, CancellationError};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// An error on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            source: None,
        }
    }

    /// HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let (status, code) = match err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            ErrorKind::Database => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            ErrorKind::Configuration => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR")
            }
            ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };
        Self {
            status,
            code,
            message: err.message,
            source: err.source,
        }
    }
}

impl From<AdmissionError> for ApiError {
    fn from(err: AdmissionError) -> Self {
        let code = match &err {
            AdmissionError::DuplicateRegistration => "DUPLICATE_REGISTRATION",
            AdmissionError::SlotNotFound => "SLOT_NOT_FOUND",
            AdmissionError::SlotFull => "SLOT_FULL",
            AdmissionError::ConcurrencyExhausted { .. } => "CONCURRENCY_EXHAUSTED",
            AdmissionError::Transient(_) => "TRANSIENT_ERROR",
        };
        Self {
            code,
            ..Self::from(AppError::from(err))
        }
    }
}

impl From<CancellationError> for ApiError {
    fn from(err: CancellationError) -> Self {
        let code = match &err {
            CancellationError::NotFound => "REGISTRATION_NOT_FOUND",
            CancellationError::SlotAlreadyPassed => "SLOT_ALREADY_PASSED",
            CancellationError::Transient(_) => "TRANSIENT_ERROR",
        };
        Self {
            code,
            ..Self::from(AppError::from(err))
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let message =
            first_message(&errors).unwrap_or_else(|| "필수 정보가 누락되었습니다.".to_string());
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
    }
}

/// The first human-readable message anywhere in `errors`, nested or not.
fn first_message(errors: &ValidationErrors) -> Option<String> {
    errors.errors().values().find_map(|kind| match kind {
        ValidationErrorsKind::Field(errs) => errs
            .iter()
            .find_map(|e| e.message.as_ref().map(|m| m.to_string())),
        ValidationErrorsKind::Struct(inner) => first_message(inner),
        ValidationErrorsKind::List(items) => items.values().find_map(|inner| first_message(inner)),
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            match &self.source {
                Some(source) => tracing::error!(
                    code = self.code,
                    error = %self.message,
                    source = %source,
                    "Request failed"
                ),
                None => tracing::error!(code = self.code, error = %self.message, "Request failed"),
            }
        }

        let body = ApiErrorResponse {
            error: self.code.to_string(),
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}
