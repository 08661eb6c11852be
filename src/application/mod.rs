//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) and query handlers (read) are kept separate.

pub mod handlers;

pub use handlers::{
    // Dialogue handlers
    CreateDialogueCommand, CreateDialogueHandler, CreateDialogueResult, DialogueGenerator,
    GetDialogueHandler, GetDialogueQuery, ListDialoguesHandler, ListDialoguesQuery,
    ListFavoritesHandler, SetFavoriteCommand, SetFavoriteHandler,
    // Stats handlers
    GetStatsHandler, RecordDialogueCompletedHandler, RecordPracticeCommand, RecordPracticeHandler,
    // Auth handlers
    CredentialsCommand, SignInHandler, SignUpHandler,
};
