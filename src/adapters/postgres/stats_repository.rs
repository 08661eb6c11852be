//! PostgreSQL implementation of PracticeStatsRepository.
//!
//! One row per user. Counters are incremented in a single upsert so
//! concurrent practice reports never lose updates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::collections::{BTreeMap, HashMap};

use crate::domain::dialogue::Language;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::practice::UserStats;
use crate::ports::PracticeStatsRepository;

/// PostgreSQL implementation of PracticeStatsRepository.
#[derive(Clone)]
pub struct PostgresStatsRepository {
    pool: PgPool,
}

impl PostgresStatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const RETURNING_COLUMNS: &str =
    "user_id, dialogues_completed, total_practice_secs, languages_practiced, updated_at";

#[async_trait]
impl PracticeStatsRepository for PostgresStatsRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserStats>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM user_stats WHERE user_id = $1",
            RETURNING_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch stats: {}", e)))?;

        row.map(row_to_stats).transpose()
    }

    async fn record_practice(
        &self,
        user_id: &UserId,
        secs: u64,
        language: Option<Language>,
    ) -> Result<UserStats, DomainError> {
        let secs = i64::try_from(secs)
            .map_err(|_| DomainError::database("Practice time exceeds storage range"))?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO user_stats (user_id, total_practice_secs, languages_practiced, updated_at)
            VALUES (
                $1, $2,
                CASE WHEN $3::text IS NULL THEN '{{}}'::jsonb ELSE jsonb_build_object($3::text, 1) END,
                now()
            )
            ON CONFLICT (user_id) DO UPDATE SET
                total_practice_secs = user_stats.total_practice_secs + EXCLUDED.total_practice_secs,
                languages_practiced = CASE
                    WHEN $3::text IS NULL THEN user_stats.languages_practiced
                    ELSE jsonb_set(
                        user_stats.languages_practiced,
                        ARRAY[$3::text],
                        to_jsonb(COALESCE((user_stats.languages_practiced ->> $3::text)::int, 0) + 1)
                    )
                END,
                updated_at = now()
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(secs)
        .bind(language.map(|l| l.name()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to record practice: {}", e)))?;

        row_to_stats(row)
    }

    async fn record_dialogue_completed(&self, user_id: &UserId) -> Result<UserStats, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO user_stats (user_id, dialogues_completed, updated_at)
            VALUES ($1, 1, now())
            ON CONFLICT (user_id) DO UPDATE SET
                dialogues_completed = user_stats.dialogues_completed + 1,
                updated_at = now()
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to record completed dialogue: {}", e))
        })?;

        row_to_stats(row)
    }
}

fn row_to_stats(row: PgRow) -> Result<UserStats, DomainError> {
    let read = |e: sqlx::Error| DomainError::database(format!("Failed to read stats row: {}", e));

    let user_id: String = row.try_get("user_id").map_err(read)?;
    let dialogues_completed: i32 = row.try_get("dialogues_completed").map_err(read)?;
    let total_practice_secs: i64 = row.try_get("total_practice_secs").map_err(read)?;
    let Json(languages): Json<HashMap<String, i64>> =
        row.try_get("languages_practiced").map_err(read)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(read)?;

    let user_id = UserId::new(user_id)
        .map_err(|e| DomainError::database(format!("Invalid stored user id: {}", e)))?;

    Ok(UserStats {
        user_id,
        dialogues_completed: u32::try_from(dialogues_completed).unwrap_or(0),
        total_practice_secs: u64::try_from(total_practice_secs).unwrap_or(0),
        languages_practiced: parse_language_counts(languages),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}

/// Converts the stored name-keyed map, skipping languages no longer supported.
fn parse_language_counts(stored: HashMap<String, i64>) -> BTreeMap<Language, u32> {
    stored
        .into_iter()
        .filter_map(|(name, count)| match name.parse::<Language>() {
            Ok(language) => Some((language, u32::try_from(count).unwrap_or(0))),
            Err(_) => {
                tracing::warn!(language = %name, "Skipping unknown language in stored stats");
                None
            }
        })
        .collect()
}
