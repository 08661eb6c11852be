//! Supabase Auth (GoTrue) identity adapter.
//!
//! Implements password sign-in and sign-up against the project's REST auth
//! endpoints using the public anon key:
//!
//! - `POST {url}/auth/v1/token?grant_type=password`
//! - `POST {url}/auth/v1/signup`

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::{AuthSession, IdentityProvider, SignUpOutcome};

/// Configuration for the GoTrue identity adapter.
#[derive(Debug, Clone)]
pub struct SupabaseIdentityConfig {
    /// Project URL, e.g. "https://xyz.supabase.co".
    pub project_url: String,
    anon_key: Secret<String>,
    pub timeout: Duration,
}

impl SupabaseIdentityConfig {
    pub fn new(project_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            project_url: project_url.into().trim_end_matches('/').to_string(),
            anon_key: Secret::new(anon_key.into()),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn token_url(&self) -> String {
        format!("{}/auth/v1/token?grant_type=password", self.project_url)
    }

    fn signup_url(&self) -> String {
        format!("{}/auth/v1/signup", self.project_url)
    }
}

/// GoTrue-backed identity provider.
pub struct SupabaseIdentityProvider {
    config: SupabaseIdentityConfig,
    http_client: Client,
}

impl SupabaseIdentityProvider {
    pub fn new(config: SupabaseIdentityConfig) -> Result<Self, AuthError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AuthError::service_unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    async fn post_credentials(
        &self,
        url: String,
        email: &str,
        password: &str,
    ) -> Result<Response, AuthError> {
        self.http_client
            .post(url)
            .header("apikey", self.config.anon_key.expose_secret())
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Auth request failed: {}", e);
                AuthError::service_unavailable(format!("Auth request failed: {}", e))
            })
    }

    /// Maps a GoTrue error response to an `AuthError`.
    fn error_from(status: StatusCode, body: &str) -> AuthError {
        let parsed: GoTrueError = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .msg
            .or(parsed.error_description)
            .or(parsed.message)
            .unwrap_or_else(|| body.to_string());
        let code = parsed.error_code.or(parsed.error).unwrap_or_default();

        if status.is_server_error() {
            return AuthError::service_unavailable(format!("Auth service returned {}", status));
        }
        if code == "invalid_grant"
            || code == "invalid_credentials"
            || message.contains("Invalid login credentials")
        {
            return AuthError::InvalidCredentials;
        }
        if code == "user_already_exists"
            || code == "email_exists"
            || message.contains("already registered")
        {
            return AuthError::EmailAlreadyRegistered;
        }
        AuthError::InvalidRequest(message)
    }

    fn session_from(body: GoTrueResponse) -> Result<Option<AuthSession>, AuthError> {
        let Some(access_token) = body.access_token else {
            return Ok(None);
        };
        let user = body.user.ok_or_else(|| {
            tracing::warn!("Auth response has a token but no user");
            AuthError::service_unavailable("Auth response missing user")
        })?;
        Ok(Some(AuthSession {
            access_token,
            refresh_token: body.refresh_token,
            expires_in_secs: body.expires_in,
            user: user.into_domain()?,
        }))
    }

    async fn read_body(response: Response) -> Result<GoTrueResponse, AuthError> {
        let status = response.status();
        let text = response.text().await.map_err(|e| {
            AuthError::service_unavailable(format!("Failed to read auth response: {}", e))
        })?;

        if !status.is_success() {
            return Err(Self::error_from(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!("Failed to parse auth response: {}", e);
            AuthError::service_unavailable(format!("Failed to parse auth response: {}", e))
        })
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let response = self
            .post_credentials(self.config.token_url(), email, password)
            .await?;
        let body = Self::read_body(response).await?;

        Self::session_from(body)?.ok_or_else(|| {
            tracing::warn!("Sign-in response carried no session");
            AuthError::service_unavailable("Sign-in response missing session")
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        let response = self
            .post_credentials(self.config.signup_url(), email, password)
            .await?;
        let body = Self::read_body(response).await?;

        match Self::session_from(body)? {
            Some(session) => Ok(SignUpOutcome::SignedIn(session)),
            None => Ok(SignUpOutcome::ConfirmationRequired {
                email: email.to_string(),
            }),
        }
    }
}

impl std::fmt::Debug for SupabaseIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseIdentityProvider")
            .field("project_url", &self.config.project_url)
            .finish_non_exhaustive()
    }
}

// ----- GoTrue API Types -----

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct GoTrueResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    user: Option<GoTrueUser>,
}

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_confirmed_at: Option<String>,
}

impl GoTrueUser {
    fn into_domain(self) -> Result<AuthenticatedUser, AuthError> {
        let id = UserId::new(self.id).map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(
            id,
            self.email.unwrap_or_default(),
            self.email_confirmed_at.is_some(),
        ))
    }
}

#[derive(Debug, Default, Deserialize)]
struct GoTrueError {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_from_project_url() {
        let config = SupabaseIdentityConfig::new("https://xyz.supabase.co/", "anon");
        assert_eq!(
            config.token_url(),
            "https://xyz.supabase.co/auth/v1/token?grant_type=password"
        );
        assert_eq!(config.signup_url(), "https://xyz.supabase.co/auth/v1/signup");
    }

    #[test]
    fn invalid_grant_is_invalid_credentials() {
        let err = SupabaseIdentityProvider::error_from(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[test]
    fn existing_user_is_already_registered() {
        let err = SupabaseIdentityProvider::error_from(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#,
        );
        assert_eq!(err, AuthError::EmailAlreadyRegistered);
    }

    #[test]
    fn weak_password_is_invalid_request() {
        let err = SupabaseIdentityProvider::error_from(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"code":422,"error_code":"weak_password","msg":"Password should be at least 6 characters."}"#,
        );
        assert_eq!(
            err,
            AuthError::InvalidRequest("Password should be at least 6 characters.".to_string())
        );
    }

    #[test]
    fn server_error_is_unavailable() {
        let err = SupabaseIdentityProvider::error_from(StatusCode::BAD_GATEWAY, "<html>");
        assert!(err.is_transient());
    }

    #[test]
    fn session_response_becomes_session() {
        let body: GoTrueResponse = serde_json::from_str(
            r#"{
                "access_token": "jwt",
                "token_type": "bearer",
                "expires_in": 3600,
                "refresh_token": "refresh",
                "user": {"id": "u-1", "email": "a@b.co", "email_confirmed_at": "2024-01-01T00:00:00Z"}
            }"#,
        )
        .unwrap();

        let session = SupabaseIdentityProvider::session_from(body).unwrap().unwrap();
        assert_eq!(session.access_token, "jwt");
        assert_eq!(session.expires_in_secs, Some(3600));
        assert_eq!(session.user.id.as_str(), "u-1");
        assert!(session.user.email_verified);
    }

    #[test]
    fn user_only_response_means_confirmation_pending() {
        let body: GoTrueResponse =
            serde_json::from_str(r#"{"id":"u-1","email":"a@b.co","confirmation_sent_at":"2024-01-01T00:00:00Z"}"#)
                .unwrap();
        assert!(SupabaseIdentityProvider::session_from(body).unwrap().is_none());
    }
}
