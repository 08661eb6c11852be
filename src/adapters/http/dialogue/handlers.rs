//! HTTP handlers for dialogue endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{json_rejection_response, ErrorResponse};
use crate::adapters::http::middleware::{OptionalAuth, RequireAuth};
use crate::application::handlers::dialogue::{
    CreateDialogueCommand, CreateDialogueHandler, GetDialogueHandler, GetDialogueQuery,
    ListDialoguesHandler, ListDialoguesQuery, ListFavoritesHandler, SetFavoriteCommand,
    SetFavoriteHandler,
};
use crate::domain::dialogue::{DialogueError, PromptInput};
use crate::domain::foundation::DialogueId;

use super::dto::{DialogueListResponse, DialogueResponse, ListDialoguesParams, SetFavoriteRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct DialogueHandlers {
    create_handler: Arc<CreateDialogueHandler>,
    get_handler: Arc<GetDialogueHandler>,
    set_favorite_handler: Arc<SetFavoriteHandler>,
    list_favorites_handler: Arc<ListFavoritesHandler>,
    list_handler: Arc<ListDialoguesHandler>,
}

impl DialogueHandlers {
    pub fn new(
        create_handler: Arc<CreateDialogueHandler>,
        get_handler: Arc<GetDialogueHandler>,
        set_favorite_handler: Arc<SetFavoriteHandler>,
        list_favorites_handler: Arc<ListFavoritesHandler>,
        list_handler: Arc<ListDialoguesHandler>,
    ) -> Self {
        Self {
            create_handler,
            get_handler,
            set_favorite_handler,
            list_favorites_handler,
            list_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/dialogues - Generate a dialogue; saved when the caller is signed in
pub async fn create_dialogue(
    State(handlers): State<DialogueHandlers>,
    OptionalAuth(user): OptionalAuth,
    body: Result<Json<PromptInput>, JsonRejection>,
) -> Response {
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => return json_rejection_response("INVALID_PROMPT", rejection),
    };
    let cmd = CreateDialogueCommand {
        input,
        owner: user.map(|u| u.id),
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(result) => {
            let response = DialogueResponse::from(&result.dialogue);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_dialogue_error(e),
    }
}

/// GET /api/dialogues - Most recent dialogues of the caller
pub async fn list_dialogues(
    State(handlers): State<DialogueHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListDialoguesParams>,
) -> Response {
    let query = ListDialoguesQuery {
        user_id: user.id,
        limit: params.limit,
    };

    match handlers.list_handler.handle(query).await {
        Ok(dialogues) => {
            (StatusCode::OK, Json(DialogueListResponse::from(dialogues))).into_response()
        }
        Err(e) => handle_dialogue_error(e),
    }
}

/// GET /api/dialogues/favorites - Favorited dialogues of the caller
pub async fn list_favorites(
    State(handlers): State<DialogueHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.list_favorites_handler.handle(&user.id).await {
        Ok(dialogues) => {
            (StatusCode::OK, Json(DialogueListResponse::from(dialogues))).into_response()
        }
        Err(e) => handle_dialogue_error(e),
    }
}

/// GET /api/dialogues/:id - One saved dialogue
pub async fn get_dialogue(
    State(handlers): State<DialogueHandlers>,
    RequireAuth(user): RequireAuth,
    Path(dialogue_id): Path<String>,
) -> Response {
    let Ok(dialogue_id) = dialogue_id.parse::<DialogueId>() else {
        return ErrorResponse::bad_request("Invalid dialogue ID")
            .into_response_with(StatusCode::BAD_REQUEST);
    };

    let query = GetDialogueQuery {
        dialogue_id,
        user_id: user.id,
    };

    match handlers.get_handler.handle(query).await {
        Ok(dialogue) => (StatusCode::OK, Json(DialogueResponse::from(&dialogue))).into_response(),
        Err(e) => handle_dialogue_error(e),
    }
}

/// PUT /api/dialogues/:id/favorite - Mark or unmark a favorite
pub async fn set_favorite(
    State(handlers): State<DialogueHandlers>,
    RequireAuth(user): RequireAuth,
    Path(dialogue_id): Path<String>,
    body: Result<Json<SetFavoriteRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response("BAD_REQUEST", rejection),
    };
    let Ok(dialogue_id) = dialogue_id.parse::<DialogueId>() else {
        return ErrorResponse::bad_request("Invalid dialogue ID")
            .into_response_with(StatusCode::BAD_REQUEST);
    };

    let cmd = SetFavoriteCommand {
        dialogue_id,
        user_id: user.id,
        is_favorite: req.is_favorite,
    };

    match handlers.set_favorite_handler.handle(cmd).await {
        Ok(dialogue) => (StatusCode::OK, Json(DialogueResponse::from(&dialogue))).into_response(),
        Err(e) => handle_dialogue_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_dialogue_error(error: DialogueError) -> Response {
    match error {
        DialogueError::InvalidPrompt(e) => {
            let field = e.field().to_string();
            ErrorResponse::new("INVALID_PROMPT", e.to_string())
                .with_details(serde_json::json!({ "field": field }))
                .into_response_with(StatusCode::BAD_REQUEST)
        }
        DialogueError::GenerationFailed(e) => {
            tracing::error!(error = %e, "Dialogue generation failed");
            ErrorResponse::new("GENERATION_FAILED", "Failed to generate dialogue")
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
        DialogueError::NotFound(id) => ErrorResponse::not_found("Dialogue", &id.to_string())
            .into_response_with(StatusCode::NOT_FOUND),
        DialogueError::Forbidden => ErrorResponse::new("FORBIDDEN", "Permission denied")
            .into_response_with(StatusCode::FORBIDDEN),
        DialogueError::NotPersisted => {
            ErrorResponse::new("DIALOGUE_NOT_PERSISTED", "Dialogue has not been saved")
                .into_response_with(StatusCode::CONFLICT)
        }
        DialogueError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Dialogue storage failed");
            ErrorResponse::internal("Internal server error")
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::{ExtractionError, GenerationError};
    use crate::domain::foundation::ValidationError;

    #[test]
    fn invalid_prompt_maps_to_400() {
        let response = handle_dialogue_error(ValidationError::empty_field("topic").into());
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn generation_failure_maps_to_500() {
        let error = DialogueError::from(GenerationError::from(ExtractionError::NoJsonFound));
        let response = handle_dialogue_error(error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_dialogue_error(DialogueError::NotFound(DialogueId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn not_persisted_maps_to_409() {
        let response = handle_dialogue_error(DialogueError::NotPersisted);
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
