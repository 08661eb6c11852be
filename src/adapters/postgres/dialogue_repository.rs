//! PostgreSQL implementation of DialogueRepository.
//!
//! The validated prompt and the generated lines are stored as JSONB documents
//! alongside the owner and favorite flag.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::dialogue::{Dialogue, DialogueLine, DialoguePrompt, DialogueRecord};
use crate::domain::foundation::{DialogueId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::DialogueRepository;

/// PostgreSQL implementation of DialogueRepository.
#[derive(Clone)]
pub struct PostgresDialogueRepository {
    pool: PgPool,
}

impl PostgresDialogueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, user_id, prompt, lines, is_favorite, created_at FROM dialogues";

#[async_trait]
impl DialogueRepository for PostgresDialogueRepository {
    async fn insert(&self, dialogue: &Dialogue) -> Result<(), DomainError> {
        let record = dialogue.record().ok_or_else(|| {
            DomainError::new(
                ErrorCode::DialogueNotPersisted,
                "Cannot store a dialogue without an id and owner",
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO dialogues (
                id, user_id, prompt, lines, is_favorite, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.owner.as_str())
        .bind(Json(dialogue.prompt()))
        .bind(Json(dialogue.lines()))
        .bind(dialogue.is_favorite())
        .bind(record.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert dialogue: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &DialogueId) -> Result<Option<Dialogue>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch dialogue: {}", e)))?;

        row.map(row_to_dialogue).transpose()
    }

    async fn set_favorite(&self, id: &DialogueId, favorite: bool) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE dialogues SET is_favorite = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(favorite)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to update favorite: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DialogueNotFound,
                format!("Dialogue not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn list_favorites(&self, owner: &UserId) -> Result<Vec<Dialogue>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE user_id = $1 AND is_favorite ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch favorites: {}", e)))?;

        rows.into_iter().map(row_to_dialogue).collect()
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
        limit: u32,
    ) -> Result<Vec<Dialogue>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
            SELECT_COLUMNS
        ))
        .bind(owner.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch dialogues: {}", e)))?;

        rows.into_iter().map(row_to_dialogue).collect()
    }
}

fn row_to_dialogue(row: PgRow) -> Result<Dialogue, DomainError> {
    let id: Uuid = get(&row, "id")?;
    let user_id: String = get(&row, "user_id")?;
    let Json(prompt): Json<DialoguePrompt> = get(&row, "prompt")?;
    let Json(lines): Json<Vec<DialogueLine>> = get(&row, "lines")?;
    let is_favorite: bool = get(&row, "is_favorite")?;
    let created_at: DateTime<Utc> = get(&row, "created_at")?;

    let owner = UserId::new(user_id)
        .map_err(|e| DomainError::database(format!("Invalid stored owner: {}", e)))?;

    Ok(Dialogue::reconstitute(
        DialogueRecord {
            id: DialogueId::from_uuid(id),
            owner,
            created_at: Timestamp::from_datetime(created_at),
        },
        prompt,
        lines,
        is_favorite,
    ))
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| DomainError::database(format!("Failed to read column {}: {}", column, e)))
}
