//! In-memory repository adapters.
//!
//! Used when no database URL is configured, and by tests.

mod dialogue_repository;
mod stats_repository;

pub use dialogue_repository::InMemoryDialogueRepository;
pub use stats_repository::InMemoryStatsRepository;
