//! Practice statistics repository port.
//!
//! Counters are updated in place by the store so concurrent sessions of the
//! same user do not lose increments.

use crate::domain::dialogue::Language;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::practice::UserStats;
use async_trait::async_trait;

/// Repository port for per-user practice statistics.
#[async_trait]
pub trait PracticeStatsRepository: Send + Sync {
    /// Stats for a user, or `None` if they have never practiced.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserStats>, DomainError>;

    /// Adds practice time and bumps the language counter, creating the row
    /// when missing.
    async fn record_practice(
        &self,
        user_id: &UserId,
        secs: u64,
        language: Option<Language>,
    ) -> Result<UserStats, DomainError>;

    /// Increments the completed-dialogue counter, creating the row when missing.
    async fn record_dialogue_completed(&self, user_id: &UserId) -> Result<UserStats, DomainError>;
}
