//! SignInHandler - email/password sign-in.

use std::sync::Arc;

use crate::domain::foundation::AuthError;
use crate::ports::{AuthSession, IdentityProvider};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Command carrying user credentials.
#[derive(Clone)]
pub struct CredentialsCommand {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for CredentialsCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsCommand")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl CredentialsCommand {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks the shape of the credentials before contacting the provider.
    pub fn validate(&self) -> Result<(), AuthError> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::InvalidRequest(
                "A valid email address is required".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidRequest(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

/// Handler for signing in.
pub struct SignInHandler {
    identity: Arc<dyn IdentityProvider>,
}

impl SignInHandler {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    pub async fn handle(&self, cmd: CredentialsCommand) -> Result<AuthSession, AuthError> {
        cmd.validate()?;
        let session = self.identity.sign_in(cmd.email.trim(), &cmd.password).await?;
        tracing::info!(user_id = %session.user.id, "User signed in");
        Ok(session)
    }
}
