//! HTTP adapter for dialogue endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{DialogueListResponse, DialogueResponse, ListDialoguesParams, SetFavoriteRequest};
pub use handlers::DialogueHandlers;
pub use routes::dialogue_routes;
