//! Authentication configuration (Supabase)

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum length Supabase enforces for project JWT secrets.
const MIN_JWT_SECRET_LEN: usize = 32;

/// Supabase project settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub supabase_url: String,

    /// Project JWT secret used to verify access tokens
    pub supabase_jwt_secret: String,

    /// Public anon key, sent as `apikey` on sign-in and sign-up calls
    pub supabase_anon_key: String,

    /// Reject tokens whose issuer is not this project
    #[serde(default = "default_verify_issuer")]
    pub verify_issuer: bool,

    /// Clock skew tolerance for token expiry, in seconds
    #[serde(default = "default_leeway")]
    pub jwt_leeway_secs: u64,
}

impl AuthConfig {
    /// Issuer claim Supabase puts on this project's tokens.
    pub fn issuer(&self) -> String {
        format!("{}/auth/v1", self.supabase_url.trim_end_matches('/'))
    }

    /// Validate authentication configuration
    ///
    /// Production requires an HTTPS project URL.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.supabase_url.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__SUPABASE_URL"));
        }
        if !self.supabase_url.starts_with("https://") && !self.supabase_url.starts_with("http://")
        {
            return Err(ValidationError::InvalidUrl("AUTH__SUPABASE_URL"));
        }
        if self.supabase_jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__SUPABASE_JWT_SECRET"));
        }
        if self.supabase_jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.supabase_anon_key.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__SUPABASE_ANON_KEY"));
        }

        if *environment == Environment::Production && !self.supabase_url.starts_with("https://") {
            return Err(ValidationError::AuthUrlMustBeHttps);
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_jwt_secret: String::new(),
            supabase_anon_key: String::new(),
            verify_issuer: default_verify_issuer(),
            jwt_leeway_secs: default_leeway(),
        }
    }
}

fn default_verify_issuer() -> bool {
    true
}

fn default_leeway() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AuthConfig {
        AuthConfig {
            supabase_url: "https://project.supabase.co".to_string(),
            supabase_jwt_secret: "x".repeat(40),
            supabase_anon_key: "anon-key".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_issuer_is_derived_from_url() {
        let config = AuthConfig {
            supabase_url: "https://project.supabase.co/".to_string(),
            ..valid()
        };
        assert_eq!(config.issuer(), "https://project.supabase.co/auth/v1");
    }

    #[test]
    fn test_validation_missing_url() {
        assert_eq!(
            AuthConfig::default().validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__SUPABASE_URL"))
        );
    }

    #[test]
    fn test_validation_short_secret() {
        let config = AuthConfig {
            supabase_jwt_secret: "short".to_string(),
            ..valid()
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::JwtSecretTooShort)
        );
    }

    #[test]
    fn test_validation_production_requires_https() {
        let config = AuthConfig {
            supabase_url: "http://localhost:54321".to_string(),
            ..valid()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::AuthUrlMustBeHttps)
        );
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid().validate(&Environment::Production).is_ok());
    }
}
