//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresDialogueRepository` - Saved dialogues with JSONB prompt and lines
//! - `PostgresStatsRepository` - Per-user practice counters
//!
//! Schema lives in `migrations/` and is applied at startup with `sqlx::migrate!`.

mod dialogue_repository;
mod stats_repository;

pub use dialogue_repository::PostgresDialogueRepository;
pub use stats_repository::PostgresStatsRepository;
