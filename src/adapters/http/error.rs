//! Error body shared by every HTTP module.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};

/// JSON error payload: `{code, message, details?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed.to_string(), message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized.to_string(), message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError.to_string(), message)
    }

    /// Pairs the body with a status code.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Turns an unreadable JSON body into a 400 with the given code.
///
/// Covers malformed JSON, wrong field types, overflowing numbers and a
/// missing JSON content type. Oversized bodies keep their 413.
pub fn json_rejection_response(code: &str, rejection: JsonRejection) -> Response {
    let status = match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    };
    tracing::debug!(error = %rejection.body_text(), "Rejected request body");
    ErrorResponse::new(code, rejection.body_text()).into_response_with(status)
}

/// Maps a repository-level error to a response.
///
/// Database details are logged, never returned.
pub fn domain_error_response(error: DomainError) -> Response {
    match error.code {
        ErrorCode::ValidationFailed => {
            let details = (!error.details.is_empty())
                .then(|| serde_json::to_value(&error.details).ok())
                .flatten();
            let mut body = ErrorResponse::validation(error.message);
            body.details = details;
            body.into_response_with(StatusCode::BAD_REQUEST)
        }
        ErrorCode::DialogueNotFound => {
            ErrorResponse::new(error.code.to_string(), error.message)
                .into_response_with(StatusCode::NOT_FOUND)
        }
        ErrorCode::Unauthorized => {
            ErrorResponse::unauthorized(error.message).into_response_with(StatusCode::UNAUTHORIZED)
        }
        ErrorCode::Forbidden => ErrorResponse::new(error.code.to_string(), error.message)
            .into_response_with(StatusCode::FORBIDDEN),
        _ => {
            tracing::error!(code = %error.code, message = %error.message, "Request failed");
            ErrorResponse::internal("Internal server error")
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
