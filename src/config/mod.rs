//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `LINGUA_PRACTICE` prefix
//! and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use lingua_practice::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod auth;
mod database;
mod error;
mod server;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "LINGUA_PRACTICE";

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL; absent means in-memory storage
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Supabase project settings
    pub auth: AuthConfig,

    /// Gemini settings
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `LINGUA_PRACTICE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `LINGUA_PRACTICE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `LINGUA_PRACTICE__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or cannot be
    /// parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.auth.validate(&self.server.environment)?;
        self.ai.validate()?;
        if self.server.request_timeout_secs <= self.ai.timeout_secs {
            return Err(ValidationError::RequestTimeoutBelowModelTimeout);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const MINIMAL_ENV: [(&str, &str); 4] = [
        ("LINGUA_PRACTICE__AUTH__SUPABASE_URL", "https://project.supabase.co"),
        (
            "LINGUA_PRACTICE__AUTH__SUPABASE_JWT_SECRET",
            "super-secret-jwt-token-with-at-least-32-characters",
        ),
        ("LINGUA_PRACTICE__AUTH__SUPABASE_ANON_KEY", "anon-key"),
        ("LINGUA_PRACTICE__AI__GEMINI_API_KEY", "gemini-key"),
    ];

    const OPTIONAL_ENV: [&str; 4] = [
        "LINGUA_PRACTICE__SERVER__PORT",
        "LINGUA_PRACTICE__AI__TIMEOUT_SECS",
        "LINGUA_PRACTICE__SERVER__ENVIRONMENT",
        "LINGUA_PRACTICE__DATABASE__URL",
    ];

    fn set_minimal_env() {
        for (key, value) in MINIMAL_ENV {
            env::set_var(key, value);
        }
    }

    fn clear_env() {
        for (key, _) in MINIMAL_ENV {
            env::remove_var(key);
        }
        for key in OPTIONAL_ENV {
            env::remove_var(key);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let config = load_with(&[]).unwrap();

        assert_eq!(config.auth.supabase_url, "https://project.supabase.co");
        assert_eq!(config.ai.gemini_api_key.as_deref(), Some("gemini-key"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_is_optional() {
        let config = load_with(&[]).unwrap();
        assert!(config.database.is_none());

        let config = load_with(&[(
            "LINGUA_PRACTICE__DATABASE__URL",
            "postgres://app@localhost/lingua",
        )])
        .unwrap();
        let database = config.database.unwrap();
        assert_eq!(database.url, "postgres://app@localhost/lingua");
        assert!(database.run_migrations);
    }

    #[test]
    fn test_server_defaults() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_is_production() {
        let config = load_with(&[("LINGUA_PRACTICE__SERVER__ENVIRONMENT", "production")]).unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_model_timeout_must_fit_in_request_timeout() {
        let config = load_with(&[("LINGUA_PRACTICE__AI__TIMEOUT_SECS", "90")]).unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::RequestTimeoutBelowModelTimeout)
        );
    }

    #[test]
    fn test_custom_server_port() {
        let config = load_with(&[("LINGUA_PRACTICE__SERVER__PORT", "3000")]).unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
