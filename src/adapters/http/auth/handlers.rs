//! HTTP handlers for account endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{json_rejection_response, ErrorResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::auth::{CredentialsCommand, SignInHandler, SignUpHandler};
use crate::domain::foundation::{AuthError, ErrorCode};

use super::dto::{CredentialsRequest, SessionResponse, SignUpResponse, UserResponse};

#[derive(Clone)]
pub struct AuthHandlers {
    sign_in_handler: Arc<SignInHandler>,
    sign_up_handler: Arc<SignUpHandler>,
}

impl AuthHandlers {
    pub fn new(sign_in_handler: Arc<SignInHandler>, sign_up_handler: Arc<SignUpHandler>) -> Self {
        Self {
            sign_in_handler,
            sign_up_handler,
        }
    }
}

/// POST /api/auth/sign-in - Exchange email and password for a session
pub async fn sign_in(
    State(handlers): State<AuthHandlers>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return json_rejection_response(&ErrorCode::ValidationFailed.to_string(), rejection)
        }
    };
    let cmd = CredentialsCommand::new(req.email, req.password);

    match handlers.sign_in_handler.handle(cmd).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(session))).into_response(),
        Err(e) => handle_auth_error(e),
    }
}

/// POST /api/auth/sign-up - Create an account
pub async fn sign_up(
    State(handlers): State<AuthHandlers>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return json_rejection_response(&ErrorCode::ValidationFailed.to_string(), rejection)
        }
    };
    let cmd = CredentialsCommand::new(req.email, req.password);

    match handlers.sign_up_handler.handle(cmd).await {
        Ok(outcome) => (StatusCode::CREATED, Json(SignUpResponse::from(outcome))).into_response(),
        Err(e) => handle_auth_error(e),
    }
}

/// GET /api/auth/session - The user behind the presented token
pub async fn current_session(RequireAuth(user): RequireAuth) -> Response {
    (StatusCode::OK, Json(UserResponse::from(&user))).into_response()
}

fn handle_auth_error(error: AuthError) -> Response {
    match error {
        AuthError::InvalidCredentials => {
            ErrorResponse::new("INVALID_CREDENTIALS", "Invalid email or password")
                .into_response_with(StatusCode::UNAUTHORIZED)
        }
        AuthError::EmailAlreadyRegistered => {
            ErrorResponse::new("EMAIL_ALREADY_REGISTERED", "Email already registered")
                .into_response_with(StatusCode::CONFLICT)
        }
        AuthError::InvalidRequest(msg) => {
            ErrorResponse::validation(msg).into_response_with(StatusCode::BAD_REQUEST)
        }
        AuthError::InvalidToken | AuthError::TokenExpired => {
            ErrorResponse::unauthorized(error.to_string())
                .into_response_with(StatusCode::UNAUTHORIZED)
        }
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!("Auth service unavailable: {}", msg);
            ErrorResponse::new("AUTH_UNAVAILABLE", "Authentication service unavailable")
                .into_response_with(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
