//! Dialogue error types.

use thiserror::Error;

use super::ExtractionError;
use crate::domain::foundation::{DialogueId, DomainError, ErrorCode, ValidationError};
use crate::ports::AIError;

/// Why a validated prompt did not produce a dialogue.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The model call itself failed (network, auth, quota, timeout, upstream).
    #[error("Model request failed: {0}")]
    Model(#[from] AIError),

    /// The model answered but no dialogue lines could be extracted.
    #[error("Could not extract dialogue: {0}")]
    Extraction(#[from] ExtractionError),
}

impl GenerationError {
    /// True when the failure came from the model provider rather than its output.
    pub fn is_model_failure(&self) -> bool {
        matches!(self, GenerationError::Model(_))
    }
}

/// Errors surfaced by dialogue use cases.
#[derive(Debug, Error)]
pub enum DialogueError {
    #[error("Invalid dialogue prompt: {0}")]
    InvalidPrompt(#[from] ValidationError),

    #[error("Dialogue generation failed: {0}")]
    GenerationFailed(#[from] GenerationError),

    #[error("Dialogue not found: {0}")]
    NotFound(DialogueId),

    #[error("Not allowed to access this dialogue")]
    Forbidden,

    #[error("Dialogue has not been saved")]
    NotPersisted,

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl DialogueError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DialogueError::InvalidPrompt(_) => ErrorCode::ValidationFailed,
            DialogueError::GenerationFailed(_) => ErrorCode::GenerationFailed,
            DialogueError::NotFound(_) => ErrorCode::DialogueNotFound,
            DialogueError::Forbidden => ErrorCode::Forbidden,
            DialogueError::NotPersisted => ErrorCode::DialogueNotPersisted,
            DialogueError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<DomainError> for DialogueError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DialogueNotPersisted => DialogueError::NotPersisted,
            ErrorCode::Forbidden => DialogueError::Forbidden,
            _ => DialogueError::Infrastructure(err.to_string()),
        }
    }
}
