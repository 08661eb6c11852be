//! Practice statistics handlers.

mod get_stats;
mod record_dialogue_completed;
mod record_practice;

pub use get_stats::GetStatsHandler;
pub use record_dialogue_completed::RecordDialogueCompletedHandler;
pub use record_practice::{RecordPracticeCommand, RecordPracticeHandler};
