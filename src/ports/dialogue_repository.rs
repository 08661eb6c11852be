//! Dialogue repository port.
//!
//! Persists generated dialogues for signed-in users and serves their
//! history and favorites.
//!
//! # Design
//!
//! - **Owner-scoped listings**: every list query is by owner
//! - **Newest first**: listings are ordered by creation time, descending
//! - **Persisted only**: `insert` rejects dialogues without a record

use crate::domain::dialogue::Dialogue;
use crate::domain::foundation::{DialogueId, DomainError, UserId};
use async_trait::async_trait;

/// Repository port for stored dialogues.
#[async_trait]
pub trait DialogueRepository: Send + Sync {
    /// Store a persisted dialogue.
    ///
    /// # Errors
    ///
    /// - `DialogueNotPersisted` if the dialogue has no id/owner
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, dialogue: &Dialogue) -> Result<(), DomainError>;

    /// Find a dialogue by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &DialogueId) -> Result<Option<Dialogue>, DomainError>;

    /// Set or clear the favorite flag.
    ///
    /// # Errors
    ///
    /// - `DialogueNotFound` if the dialogue doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn set_favorite(&self, id: &DialogueId, favorite: bool) -> Result<(), DomainError>;

    /// Favorite dialogues of a user, newest first.
    async fn list_favorites(&self, owner: &UserId) -> Result<Vec<Dialogue>, DomainError>;

    /// Most recent dialogues of a user, newest first, at most `limit`.
    async fn list_by_owner(&self, owner: &UserId, limit: u32)
        -> Result<Vec<Dialogue>, DomainError>;
}
