//! Dialogue command and query handlers.

mod create_dialogue;
mod generate_dialogue;
mod get_dialogue;
mod list_dialogues;
mod list_favorites;
mod set_favorite;

pub use create_dialogue::{CreateDialogueCommand, CreateDialogueHandler, CreateDialogueResult};
pub use generate_dialogue::DialogueGenerator;
pub use get_dialogue::{GetDialogueHandler, GetDialogueQuery};
pub use list_dialogues::{
    ListDialoguesHandler, ListDialoguesQuery, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
pub use list_favorites::ListFavoritesHandler;
pub use set_favorite::{SetFavoriteCommand, SetFavoriteHandler};
