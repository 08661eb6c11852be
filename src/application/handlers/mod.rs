//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod auth;
pub mod dialogue;
pub mod stats;

pub use auth::{CredentialsCommand, SignInHandler, SignUpHandler};
pub use dialogue::{
    CreateDialogueCommand, CreateDialogueHandler, CreateDialogueResult, DialogueGenerator,
    GetDialogueHandler, GetDialogueQuery, ListDialoguesHandler, ListDialoguesQuery,
    ListFavoritesHandler, SetFavoriteCommand, SetFavoriteHandler,
};
pub use stats::{
    GetStatsHandler, RecordDialogueCompletedHandler, RecordPracticeCommand, RecordPracticeHandler,
};
