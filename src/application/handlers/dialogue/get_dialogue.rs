//! GetDialogueHandler - Query handler for a single stored dialogue.

use std::sync::Arc;

use crate::domain::dialogue::{Dialogue, DialogueError};
use crate::domain::foundation::{DialogueId, UserId};
use crate::ports::DialogueRepository;

/// Query for one of the caller's dialogues.
#[derive(Debug, Clone)]
pub struct GetDialogueQuery {
    pub dialogue_id: DialogueId,
    pub user_id: UserId,
}

/// Handler for dialogue lookups.
pub struct GetDialogueHandler {
    repository: Arc<dyn DialogueRepository>,
}

impl GetDialogueHandler {
    pub fn new(repository: Arc<dyn DialogueRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetDialogueQuery) -> Result<Dialogue, DialogueError> {
        find_owned(self.repository.as_ref(), &query.dialogue_id, &query.user_id).await
    }
}

/// Loads a dialogue, hiding dialogues owned by someone else as not found.
pub(crate) async fn find_owned(
    repository: &dyn DialogueRepository,
    id: &DialogueId,
    user_id: &UserId,
) -> Result<Dialogue, DialogueError> {
    match repository.find_by_id(id).await? {
        Some(dialogue) if dialogue.is_owned_by(user_id) => Ok(dialogue),
        Some(_) => {
            tracing::warn!(dialogue_id = %id, user_id = %user_id, "Dialogue requested by non-owner");
            Err(DialogueError::NotFound(*id))
        }
        None => Err(DialogueError::NotFound(*id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDialogueRepository;
    use crate::domain::dialogue::{DialogueLine, DialoguePrompt, Difficulty, Language, Tone};

    async fn stored(repo: &InMemoryDialogueRepository, owner: &str) -> Dialogue {
        let prompt =
            DialoguePrompt::new("train station", Language::German, Difficulty::Intermediate, Tone::Formal)
                .unwrap();
        let dialogue = Dialogue::generated(prompt, vec![DialogueLine::new("A", "Guten Tag", "Good day")])
            .assign_to(UserId::new(owner).unwrap());
        repo.insert(&dialogue).await.unwrap();
        dialogue
    }

    #[tokio::test]
    async fn owner_can_read_dialogue() {
        let repo = Arc::new(InMemoryDialogueRepository::new());
        let dialogue = stored(&repo, "u1").await;
        let handler = GetDialogueHandler::new(repo);

        let found = handler
            .handle(GetDialogueQuery {
                dialogue_id: dialogue.id().unwrap(),
                user_id: UserId::new("u1").unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(found, dialogue);
    }

    #[tokio::test]
    async fn other_users_get_not_found() {
        let repo = Arc::new(InMemoryDialogueRepository::new());
        let dialogue = stored(&repo, "u1").await;
        let handler = GetDialogueHandler::new(repo);

        let result = handler
            .handle(GetDialogueQuery {
                dialogue_id: dialogue.id().unwrap(),
                user_id: UserId::new("u2").unwrap(),
            })
            .await;
        assert!(matches!(result, Err(DialogueError::NotFound(_))));
    }

    #[tokio::test]
    async fn missing_dialogue_is_not_found() {
        let handler = GetDialogueHandler::new(Arc::new(InMemoryDialogueRepository::new()));
        let result = handler
            .handle(GetDialogueQuery {
                dialogue_id: DialogueId::new(),
                user_id: UserId::new("u1").unwrap(),
            })
            .await;
        assert!(matches!(result, Err(DialogueError::NotFound(_))));
    }
}
