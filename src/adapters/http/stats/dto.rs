//! Request and response shapes for practice statistics endpoints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::practice::UserStats;

/// Body of `POST /api/stats`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPracticeRequest {
    /// Seconds practiced.
    pub practice_time: i64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
}

/// Practice statistics as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub user_id: String,
    pub dialogues_completed: u32,
    /// Total seconds practiced.
    pub total_practice_time: u64,
    /// Sessions per language, keyed by language name.
    pub languages_practiced: BTreeMap<String, u32>,
    pub language_count: usize,
    pub updated_at: String,
}

impl From<UserStats> for StatsResponse {
    fn from(stats: UserStats) -> Self {
        Self {
            user_id: stats.user_id.to_string(),
            dialogues_completed: stats.dialogues_completed,
            total_practice_time: stats.total_practice_secs,
            language_count: stats.language_count(),
            languages_practiced: stats
                .languages_practiced
                .iter()
                .map(|(language, count)| (language.name().to_string(), *count))
                .collect(),
            updated_at: stats.updated_at.to_rfc3339(),
        }
    }
}
