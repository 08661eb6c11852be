//! SignUpHandler - email/password account creation.

use std::sync::Arc;

use crate::domain::foundation::AuthError;
use crate::ports::{IdentityProvider, SignUpOutcome};

use super::CredentialsCommand;

/// Handler for signing up.
pub struct SignUpHandler {
    identity: Arc<dyn IdentityProvider>,
}

impl SignUpHandler {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    pub async fn handle(&self, cmd: CredentialsCommand) -> Result<SignUpOutcome, AuthError> {
        cmd.validate()?;
        let outcome = self.identity.sign_up(cmd.email.trim(), &cmd.password).await?;
        match &outcome {
            SignUpOutcome::SignedIn(session) => {
                tracing::info!(user_id = %session.user.id, "User signed up")
            }
            SignUpOutcome::ConfirmationRequired { .. } => {
                tracing::info!("User signed up, awaiting email confirmation")
            }
        }
        Ok(outcome)
    }
}
