//! HTTP routes for dialogue endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    create_dialogue, get_dialogue, list_dialogues, list_favorites, set_favorite, DialogueHandlers,
};

/// Creates the dialogue router, mounted at `/api/dialogues`.
pub fn dialogue_routes(handlers: DialogueHandlers) -> Router {
    Router::new()
        .route("/", post(create_dialogue).get(list_dialogues))
        .route("/favorites", get(list_favorites))
        .route("/:id", get(get_dialogue))
        .route("/:id/favorite", put(set_favorite))
        .with_state(handlers)
}
