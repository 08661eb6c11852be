//! AI provider configuration (Google Gemini)

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

/// Gemini client settings
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// Model name, e.g. `gemini-1.5-flash`
    #[serde(default = "default_model")]
    pub gemini_model: String,

    /// Generative Language API base URL
    #[serde(default = "default_base_url")]
    pub gemini_base_url: String,

    /// Model request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is present
    pub fn has_api_key(&self) -> bool {
        self.gemini_api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("AI__GEMINI_API_KEY"));
        }
        if self.gemini_model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__GEMINI_MODEL"));
        }
        if !self.gemini_base_url.starts_with("https://")
            && !self.gemini_base_url.starts_with("http://")
        {
            return Err(ValidationError::InvalidUrl("AI__GEMINI_BASE_URL"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: default_model(),
            gemini_base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_validation_requires_key() {
        assert_eq!(
            AiConfig::default().validate(),
            Err(ValidationError::MissingRequired("AI__GEMINI_API_KEY"))
        );

        let blank = AiConfig {
            gemini_api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_validation_timeout_bounds() {
        let config = AiConfig {
            gemini_api_key: Some("key".to_string()),
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validation_valid_config() {
        let config = AiConfig {
            gemini_api_key: Some("key".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
