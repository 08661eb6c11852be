//! Supabase JWT adapter for access token validation.
//!
//! Supabase signs user access tokens with the project's JWT secret (HS256).
//! This adapter validates them locally:
//!
//! 1. Signature against the shared secret
//! 2. Audience must be `authenticated` (anon and service tokens are rejected)
//! 3. Expiry must be in the future
//! 4. Issuer, when configured, must match `{project_url}/auth/v1`
//!
//! # Example
//!
//! ```ignore
//! let config = SupabaseJwtConfig::new(jwt_secret)
//!     .with_issuer("https://xyz.supabase.co/auth/v1");
//! let validator = SupabaseSessionValidator::new(config);
//! let user = validator.validate("eyJ...").await?;
//! ```

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Audience Supabase puts on signed-in user tokens.
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// Configuration for the Supabase JWT validator.
#[derive(Debug, Clone)]
pub struct SupabaseJwtConfig {
    jwt_secret: Secret<String>,
    /// Expected audience claim.
    pub audience: String,
    /// Expected issuer, if it should be checked.
    pub issuer: Option<String>,
    /// Clock skew tolerance in seconds.
    pub leeway_secs: u64,
}

impl SupabaseJwtConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: Secret::new(jwt_secret.into()),
            audience: AUTHENTICATED_AUDIENCE.to_string(),
            issuer: None,
            leeway_secs: 30,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_leeway(mut self, secs: u64) -> Self {
        self.leeway_secs = secs;
        self
    }
}

/// JWT claims issued by Supabase Auth.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SupabaseClaims {
    /// Subject - the user ID
    pub sub: String,
    pub aud: String,
    pub exp: i64,
    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<UserMetadata>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct UserMetadata {
    #[serde(default)]
    pub email_verified: Option<bool>,
}

/// Supabase session validator.
pub struct SupabaseSessionValidator {
    config: SupabaseJwtConfig,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SupabaseSessionValidator {
    pub fn new(config: SupabaseJwtConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&config.audience]);
        if let Some(ref issuer) = config.issuer {
            validation.set_issuer(&[issuer]);
        }
        validation.validate_exp = true;
        validation.leeway = config.leeway_secs;
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);

        Self {
            config,
            decoding_key,
            validation,
        }
    }
}

#[async_trait]
impl SessionValidator for SupabaseSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<SupabaseClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidAudience => {
                    tracing::warn!(expected = %self.config.audience, "Invalid audience in token");
                    AuthError::InvalidToken
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Invalid issuer in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            })?;
        let claims = data.claims;

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Token has empty subject");
            AuthError::InvalidToken
        })?;

        let email_verified = claims
            .user_metadata
            .and_then(|m| m.email_verified)
            .unwrap_or(false);

        Ok(AuthenticatedUser::new(
            user_id,
            claims.email.unwrap_or_default(),
            email_verified,
        ))
    }
}

impl std::fmt::Debug for SupabaseSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseSessionValidator")
            .field("audience", &self.config.audience)
            .field("issuer", &self.config.issuer)
            .finish_non_exhaustive()
    }
}
