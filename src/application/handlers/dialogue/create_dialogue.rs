//! CreateDialogueHandler - generates a dialogue and stores it for signed-in users.

use std::sync::Arc;

use crate::domain::dialogue::{Dialogue, DialogueError, PromptInput};
use crate::domain::foundation::UserId;
use crate::ports::DialogueRepository;

use super::DialogueGenerator;

/// Command to create a dialogue.
#[derive(Debug, Clone)]
pub struct CreateDialogueCommand {
    pub input: PromptInput,
    /// Present when the caller is signed in.
    pub owner: Option<UserId>,
}

/// Result of dialogue creation.
#[derive(Debug, Clone)]
pub struct CreateDialogueResult {
    pub dialogue: Dialogue,
    /// False when there was no owner or the store rejected the write.
    pub persisted: bool,
}

/// Handler for creating dialogues.
pub struct CreateDialogueHandler {
    generator: Arc<DialogueGenerator>,
    repository: Arc<dyn DialogueRepository>,
}

impl CreateDialogueHandler {
    pub fn new(generator: Arc<DialogueGenerator>, repository: Arc<dyn DialogueRepository>) -> Self {
        Self {
            generator,
            repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateDialogueCommand,
    ) -> Result<CreateDialogueResult, DialogueError> {
        // 1. Generate (validates input first)
        let dialogue = self.generator.generate(&cmd.input).await?;

        // 2. Anonymous callers get the dialogue back unsaved
        let Some(owner) = cmd.owner else {
            return Ok(CreateDialogueResult {
                dialogue,
                persisted: false,
            });
        };

        // 3. Persist; a storage failure does not cost the user their dialogue
        let stored = dialogue.clone().assign_to(owner);
        match self.repository.insert(&stored).await {
            Ok(()) => {
                tracing::info!(
                    dialogue_id = ?stored.id(),
                    owner = ?stored.owner(),
                    "Stored dialogue"
                );
                Ok(CreateDialogueResult {
                    dialogue: stored,
                    persisted: true,
                })
            }
            Err(e) => {
                tracing::error!(
                    owner = ?stored.owner(),
                    error = %e,
                    "Failed to store generated dialogue"
                );
                Ok(CreateDialogueResult {
                    dialogue,
                    persisted: false,
                })
            }
        }
    }
}
