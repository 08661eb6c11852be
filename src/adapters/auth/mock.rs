//! Mock authentication adapters for testing.
//!
//! These adapters implement the `SessionValidator` and `IdentityProvider`
//! ports for use in tests, avoiding the need for a real Supabase project.
//!
//! # Example
//!
//! ```ignore
//! use lingua_practice::adapters::auth::MockSessionValidator;
//!
//! let validator = MockSessionValidator::new().with_test_user("valid-token", "user-123");
//! let user = validator.validate("valid-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::{AuthSession, IdentityProvider, SessionValidator, SignUpOutcome};

/// Mock session validator for testing.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.write().unwrap().insert(token.into(), user);
        self
    }

    /// Adds a valid token for a verified user with the given ID.
    pub fn with_test_user(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let user = AuthenticatedUser::new(
            UserId::new(&user_id).unwrap(),
            format!("{}@test.example.com", user_id),
            true,
        );
        self.with_user(token, user)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens.write().unwrap().insert(token.into(), user);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

/// Mock identity provider backed by an in-process account table.
///
/// Passwords are compared verbatim. Issued access tokens have the form
/// `mock-token-{user_id}`.
#[derive(Debug, Default)]
pub struct MockIdentityProvider {
    accounts: RwLock<HashMap<String, MockAccount>>,
    confirm_email: bool,
    force_error: RwLock<Option<AuthError>>,
    calls: AtomicUsize,
}

#[derive(Debug, Clone)]
struct MockAccount {
    user_id: String,
    password: String,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an existing account.
    pub fn with_account(self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.insert_account(email.into(), password.into());
        self
    }

    /// New sign-ups must confirm their email before a session is issued.
    pub fn requiring_confirmation(mut self) -> Self {
        self.confirm_email = true;
        self
    }

    /// Forces every call to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Number of sign-in and sign-up calls received.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn insert_account(&self, email: String, password: String) -> String {
        let mut accounts = self.accounts.write().unwrap();
        let user_id = format!("user-{}", accounts.len() + 1);
        accounts.insert(
            email,
            MockAccount {
                user_id: user_id.clone(),
                password,
            },
        );
        user_id
    }

    fn session_for(email: &str, user_id: &str) -> AuthSession {
        AuthSession {
            access_token: format!("mock-token-{}", user_id),
            refresh_token: Some(format!("mock-refresh-{}", user_id)),
            expires_in_secs: Some(3600),
            user: AuthenticatedUser::new(UserId::new(user_id).unwrap(), email, true),
        }
    }

    fn begin_call(&self) -> Result<(), AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.force_error.read().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        self.begin_call()?;

        let accounts = self.accounts.read().unwrap();
        match accounts.get(email) {
            Some(account) if account.password == password => {
                Ok(Self::session_for(email, &account.user_id))
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        self.begin_call()?;

        if self.accounts.read().unwrap().contains_key(email) {
            return Err(AuthError::EmailAlreadyRegistered);
        }
        let user_id = self.insert_account(email.to_string(), password.to_string());

        if self.confirm_email {
            Ok(SignUpOutcome::ConfirmationRequired {
                email: email.to_string(),
            })
        } else {
            Ok(SignUpOutcome::SignedIn(Self::session_for(email, &user_id)))
        }
    }
}
