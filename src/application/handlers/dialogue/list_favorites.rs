//! ListFavoritesHandler - Query handler for a user's favorite dialogues.

use std::sync::Arc;

use crate::domain::dialogue::{Dialogue, DialogueError};
use crate::domain::foundation::UserId;
use crate::ports::DialogueRepository;

/// Handler for listing favorites, newest first.
pub struct ListFavoritesHandler {
    repository: Arc<dyn DialogueRepository>,
}

impl ListFavoritesHandler {
    pub fn new(repository: Arc<dyn DialogueRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<Dialogue>, DialogueError> {
        Ok(self.repository.list_favorites(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDialogueRepository;
    use crate::domain::dialogue::{DialogueLine, DialoguePrompt, Difficulty, Language, Tone};

    #[tokio::test]
    async fn returns_only_favorites_of_user() {
        let repo = Arc::new(InMemoryDialogueRepository::new());
        let owner = UserId::new("u1").unwrap();
        for (topic, favorite) in [("a", true), ("b", false), ("c", true)] {
            let prompt =
                DialoguePrompt::new(topic, Language::French, Difficulty::Beginner, Tone::Casual)
                    .unwrap();
            let d = Dialogue::generated(prompt, vec![DialogueLine::new("A", "x", "y")])
                .assign_to(owner.clone());
            repo.insert(&d).await.unwrap();
            if favorite {
                repo.set_favorite(&d.id().unwrap(), true).await.unwrap();
            }
        }

        let handler = ListFavoritesHandler::new(repo);
        let favorites = handler.handle(&owner).await.unwrap();

        let topics: Vec<&str> = favorites.iter().map(|d| d.prompt().topic()).collect();
        assert_eq!(topics, vec!["c", "a"]);
        assert!(handler
            .handle(&UserId::new("u2").unwrap())
            .await
            .unwrap()
            .is_empty());
    }
}
