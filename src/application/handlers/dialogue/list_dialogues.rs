//! ListDialoguesHandler - Query handler for a user's recent dialogues.

use std::sync::Arc;

use crate::domain::dialogue::{Dialogue, DialogueError};
use crate::domain::foundation::UserId;
use crate::ports::DialogueRepository;

/// Page size when the caller does not ask for one.
pub const DEFAULT_LIST_LIMIT: u32 = 20;

/// Largest page a caller may request.
pub const MAX_LIST_LIMIT: u32 = 100;

/// Query for recent dialogues.
#[derive(Debug, Clone)]
pub struct ListDialoguesQuery {
    pub user_id: UserId,
    pub limit: Option<u32>,
}

/// Handler for listing recent dialogues, newest first.
pub struct ListDialoguesHandler {
    repository: Arc<dyn DialogueRepository>,
}

impl ListDialoguesHandler {
    pub fn new(repository: Arc<dyn DialogueRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListDialoguesQuery) -> Result<Vec<Dialogue>, DialogueError> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT);
        Ok(self.repository.list_by_owner(&query.user_id, limit).await?)
    }
}
