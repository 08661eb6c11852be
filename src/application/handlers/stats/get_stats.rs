//! GetStatsHandler - Query handler for a user's practice statistics.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::practice::UserStats;
use crate::ports::PracticeStatsRepository;

/// Handler for reading stats. Users who never practiced get zeroed stats.
pub struct GetStatsHandler {
    repository: Arc<dyn PracticeStatsRepository>,
}

impl GetStatsHandler {
    pub fn new(repository: Arc<dyn PracticeStatsRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<UserStats, DomainError> {
        Ok(self
            .repository
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| UserStats::empty(user_id.clone())))
    }
}
