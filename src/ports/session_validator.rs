//! Session validation port for access token validation.
//!
//! HTTP middleware uses this to turn a Bearer token into the current user.
//! Implementations exist for Supabase-issued JWTs and for tests.
//!
//! All implementations MUST validate:
//! - **Signature**: token was issued by the configured project
//! - **Audience (aud)**: token is a user access token
//! - **Expiry (exp)**: token must not be expired

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate an access token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use std::collections::HashMap;

    struct TableValidator {
        tokens: HashMap<String, AuthenticatedUser>,
    }

    #[async_trait]
    impl SessionValidator for TableValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.tokens.get(token).cloned().ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn validator_can_be_used_as_trait_object() {
        let mut tokens = HashMap::new();
        tokens.insert(
            "good".to_string(),
            AuthenticatedUser::new(UserId::new("u1").unwrap(), "u1@example.com", true),
        );
        let validator: Box<dyn SessionValidator> = Box::new(TableValidator { tokens });

        assert_eq!(validator.validate("good").await.unwrap().id.as_str(), "u1");
        assert_eq!(
            validator.validate("bad").await.unwrap_err(),
            AuthError::InvalidToken
        );
    }
}
