//! HTTP routes for account endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{current_session, sign_in, sign_up, AuthHandlers};

/// Creates the account router, mounted at `/api/auth`.
pub fn auth_routes(handlers: AuthHandlers) -> Router {
    Router::new()
        .route("/sign-in", post(sign_in))
        .route("/sign-up", post(sign_up))
        .route("/session", get(current_session))
        .with_state(handlers)
}
