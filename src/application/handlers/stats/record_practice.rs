//! RecordPracticeHandler - Command handler for logging practice time.

use std::sync::Arc;

use crate::domain::dialogue::Language;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::practice::{validate_practice_secs, PracticeMode, UserStats};
use crate::ports::PracticeStatsRepository;

/// Command to record one practice session.
#[derive(Debug, Clone)]
pub struct RecordPracticeCommand {
    pub user_id: UserId,
    /// Seconds practiced, as reported by the client.
    pub practice_secs: i64,
    pub language: Option<Language>,
    pub mode: Option<PracticeMode>,
}

/// Handler for recording practice time.
pub struct RecordPracticeHandler {
    repository: Arc<dyn PracticeStatsRepository>,
}

impl RecordPracticeHandler {
    pub fn new(repository: Arc<dyn PracticeStatsRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: RecordPracticeCommand) -> Result<UserStats, DomainError> {
        // 1. Validate duration
        let secs = validate_practice_secs(cmd.practice_secs)?;

        // 2. Update counters atomically in the store
        let stats = self
            .repository
            .record_practice(&cmd.user_id, secs, cmd.language)
            .await?;

        tracing::info!(
            user_id = %cmd.user_id,
            secs,
            language = ?cmd.language,
            mode = ?cmd.mode,
            "Recorded practice session"
        );

        Ok(stats)
    }
}
