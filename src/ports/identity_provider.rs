//! Identity provider port - email/password account operations.
//!
//! Token validation lives in `SessionValidator`; this port covers the calls
//! that create sessions in the first place.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Tokens issued for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in_secs: Option<u64>,
    pub user: AuthenticatedUser,
}

/// Result of a sign-up attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// Account created and signed in immediately.
    SignedIn(AuthSession),
    /// Account created; the user must confirm their email before signing in.
    ConfirmationRequired { email: String },
}

/// Port for password-based identity operations.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` when the combination is rejected
    /// - `ServiceUnavailable` when the provider cannot be reached
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Create an account.
    ///
    /// # Errors
    ///
    /// - `EmailAlreadyRegistered` when the email is taken
    /// - `InvalidRequest` when the provider rejects the input
    /// - `ServiceUnavailable` when the provider cannot be reached
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn IdentityProvider) {}
    }
}
