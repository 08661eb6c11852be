//! In-Memory Practice Stats Repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dialogue::Language;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::practice::UserStats;
use crate::ports::PracticeStatsRepository;

/// In-memory storage for practice statistics
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatsRepository {
    stats: Arc<RwLock<HashMap<UserId, UserStats>>>,
}

impl InMemoryStatsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PracticeStatsRepository for InMemoryStatsRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserStats>, DomainError> {
        Ok(self.stats.read().await.get(user_id).cloned())
    }

    async fn record_practice(
        &self,
        user_id: &UserId,
        secs: u64,
        language: Option<Language>,
    ) -> Result<UserStats, DomainError> {
        let mut stats = self.stats.write().await;
        let entry = stats
            .entry(user_id.clone())
            .or_insert_with(|| UserStats::empty(user_id.clone()));
        entry.record_practice(secs, language);
        Ok(entry.clone())
    }

    async fn record_dialogue_completed(&self, user_id: &UserId) -> Result<UserStats, DomainError> {
        let mut stats = self.stats.write().await;
        let entry = stats
            .entry(user_id.clone())
            .or_insert_with(|| UserStats::empty(user_id.clone()));
        entry.record_dialogue_completed();
        Ok(entry.clone())
    }
}
