//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from an access token.
//! They have **no external dependencies** - the Supabase adapter and the test
//! mocks both populate them via the `SessionValidator` port.

use super::UserId;
use thiserror::Error;

/// Authenticated user extracted from a validated access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth provider.
    pub id: UserId,

    /// User's email address from the token claims.
    pub email: String,

    /// Whether the user's email has been confirmed with the auth provider.
    pub email_verified: bool,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: impl Into<String>, email_verified: bool) -> Self {
        Self {
            id,
            email: email.into(),
            email_verified,
        }
    }
}

/// Authentication errors.
///
/// Domain-centric: they describe what went wrong from the application's
/// perspective, not the auth provider's.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// Email/password combination was rejected.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// Sign-up attempted with an email that already has an account.
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    /// Sign-up or sign-in request was rejected as malformed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
