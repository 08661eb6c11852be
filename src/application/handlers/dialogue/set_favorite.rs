//! SetFavoriteHandler - Command handler for marking dialogues as favorites.

use std::sync::Arc;

use crate::domain::dialogue::{Dialogue, DialogueError};
use crate::domain::foundation::{DialogueId, UserId};
use crate::ports::DialogueRepository;

use super::get_dialogue::find_owned;

/// Command to set or clear a dialogue's favorite flag.
#[derive(Debug, Clone)]
pub struct SetFavoriteCommand {
    pub dialogue_id: DialogueId,
    pub user_id: UserId,
    pub is_favorite: bool,
}

/// Handler for favorite toggling.
pub struct SetFavoriteHandler {
    repository: Arc<dyn DialogueRepository>,
}

impl SetFavoriteHandler {
    pub fn new(repository: Arc<dyn DialogueRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: SetFavoriteCommand) -> Result<Dialogue, DialogueError> {
        // 1. Load and check ownership
        let mut dialogue =
            find_owned(self.repository.as_ref(), &cmd.dialogue_id, &cmd.user_id).await?;

        // 2. Apply in the aggregate
        dialogue.set_favorite(cmd.is_favorite)?;

        // 3. Persist
        self.repository
            .set_favorite(&cmd.dialogue_id, cmd.is_favorite)
            .await?;

        tracing::info!(
            dialogue_id = %cmd.dialogue_id,
            is_favorite = cmd.is_favorite,
            "Updated favorite flag"
        );

        Ok(dialogue)
    }
}
