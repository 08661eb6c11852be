//! RecordDialogueCompletedHandler - bumps the completed-dialogue counter.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::practice::UserStats;
use crate::ports::PracticeStatsRepository;

pub struct RecordDialogueCompletedHandler {
    repository: Arc<dyn PracticeStatsRepository>,
}

impl RecordDialogueCompletedHandler {
    pub fn new(repository: Arc<dyn PracticeStatsRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<UserStats, DomainError> {
        let stats = self.repository.record_dialogue_completed(user_id).await?;
        tracing::info!(
            user_id = %user_id,
            dialogues_completed = stats.dialogues_completed,
            "Recorded completed dialogue"
        );
        Ok(stats)
    }
}
