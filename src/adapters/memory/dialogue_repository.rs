//! In-Memory Dialogue Repository
//!
//! Keeps dialogues in insertion order. Used when no database is configured
//! and in tests.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dialogue::Dialogue;
use crate::domain::foundation::{DialogueId, DomainError, ErrorCode, UserId};
use crate::ports::DialogueRepository;

/// In-memory storage for dialogues
#[derive(Debug, Clone, Default)]
pub struct InMemoryDialogueRepository {
    dialogues: Arc<RwLock<Vec<Dialogue>>>,
}

impl InMemoryDialogueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored dialogues
    pub async fn len(&self) -> usize {
        self.dialogues.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.dialogues.read().await.is_empty()
    }

    /// Owner's dialogues, newest first. Ties keep the later insert first.
    async fn newest_first<F>(&self, owner: &UserId, keep: F) -> Vec<Dialogue>
    where
        F: Fn(&Dialogue) -> bool,
    {
        let dialogues = self.dialogues.read().await;
        let mut matching: Vec<Dialogue> = dialogues
            .iter()
            .rev()
            .filter(|d| d.is_owned_by(owner) && keep(d))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        matching
    }
}

#[async_trait]
impl DialogueRepository for InMemoryDialogueRepository {
    async fn insert(&self, dialogue: &Dialogue) -> Result<(), DomainError> {
        let id = dialogue.id().ok_or_else(|| {
            DomainError::new(
                ErrorCode::DialogueNotPersisted,
                "Cannot store a dialogue without an id and owner",
            )
        })?;

        let mut dialogues = self.dialogues.write().await;
        if dialogues.iter().any(|d| d.id() == Some(id)) {
            return Err(DomainError::database(format!("Duplicate dialogue id {}", id)));
        }
        dialogues.push(dialogue.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &DialogueId) -> Result<Option<Dialogue>, DomainError> {
        let dialogues = self.dialogues.read().await;
        Ok(dialogues.iter().find(|d| d.id() == Some(*id)).cloned())
    }

    async fn set_favorite(&self, id: &DialogueId, favorite: bool) -> Result<(), DomainError> {
        let mut dialogues = self.dialogues.write().await;
        let dialogue = dialogues
            .iter_mut()
            .find(|d| d.id() == Some(*id))
            .ok_or_else(|| {
                DomainError::new(ErrorCode::DialogueNotFound, format!("Dialogue not found: {}", id))
            })?;

        dialogue
            .set_favorite(favorite)
            .map_err(|e| DomainError::new(ErrorCode::DialogueNotPersisted, e.to_string()))
    }

    async fn list_favorites(&self, owner: &UserId) -> Result<Vec<Dialogue>, DomainError> {
        Ok(self.newest_first(owner, |d| d.is_favorite()).await)
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
        limit: u32,
    ) -> Result<Vec<Dialogue>, DomainError> {
        let mut dialogues = self.newest_first(owner, |_| true).await;
        dialogues.truncate(limit as usize);
        Ok(dialogues)
    }
}
