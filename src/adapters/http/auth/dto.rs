//! Request and response shapes for account endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{AuthSession, SignUpOutcome};

/// Body of `POST /api/auth/sign-in` and `POST /api/auth/sign-up`.
#[derive(Clone, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// The signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub email_verified: bool,
}

impl From<&AuthenticatedUser> for UserResponse {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            email_verified: user.email_verified,
        }
    }
}

/// Tokens for a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Seconds until the access token expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    pub user: UserResponse,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: UserResponse::from(&session.user),
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_in: session.expires_in_secs,
        }
    }
}

/// Result of a sign-up, tagged by `status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SignUpResponse {
    SignedIn { session: SessionResponse },
    ConfirmationRequired { email: String },
}

impl From<SignUpOutcome> for SignUpResponse {
    fn from(outcome: SignUpOutcome) -> Self {
        match outcome {
            SignUpOutcome::SignedIn(session) => SignUpResponse::SignedIn {
                session: session.into(),
            },
            SignUpOutcome::ConfirmationRequired { email } => {
                SignUpResponse::ConfirmationRequired { email }
            }
        }
    }
}
