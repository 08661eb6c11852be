//! Top-level HTTP router.
//!
//! Wires application handlers to their ports and mounts every endpoint
//! group under `/api`, behind the auth middleware and the shared
//! `tower-http` stack.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::application::handlers::auth::{SignInHandler, SignUpHandler};
use crate::application::handlers::dialogue::{
    CreateDialogueHandler, DialogueGenerator, GetDialogueHandler, ListDialoguesHandler,
    ListFavoritesHandler, SetFavoriteHandler,
};
use crate::application::handlers::stats::{
    GetStatsHandler, RecordDialogueCompletedHandler, RecordPracticeHandler,
};
use crate::ports::{
    AIProvider, DialogueRepository, IdentityProvider, PracticeStatsRepository, SessionValidator,
};

use super::auth::{auth_routes, AuthHandlers};
use super::dialogue::{dialogue_routes, DialogueHandlers};
use super::middleware::{auth_middleware, AuthState};
use super::stats::{stats_routes, StatsHandlers};

/// Everything the router needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub dialogues: DialogueHandlers,
    pub stats: StatsHandlers,
    pub auth: AuthHandlers,
    pub session_validator: AuthState,
}

impl AppState {
    /// Builds every handler from the adapters chosen by the caller.
    pub fn new(
        ai_provider: Arc<dyn AIProvider>,
        dialogue_repository: Arc<dyn DialogueRepository>,
        stats_repository: Arc<dyn PracticeStatsRepository>,
        session_validator: Arc<dyn SessionValidator>,
        identity_provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        let generator = Arc::new(DialogueGenerator::new(ai_provider));

        let dialogues = DialogueHandlers::new(
            Arc::new(CreateDialogueHandler::new(
                generator,
                dialogue_repository.clone(),
            )),
            Arc::new(GetDialogueHandler::new(dialogue_repository.clone())),
            Arc::new(SetFavoriteHandler::new(dialogue_repository.clone())),
            Arc::new(ListFavoritesHandler::new(dialogue_repository.clone())),
            Arc::new(ListDialoguesHandler::new(dialogue_repository)),
        );

        let stats = StatsHandlers::new(
            Arc::new(GetStatsHandler::new(stats_repository.clone())),
            Arc::new(RecordPracticeHandler::new(stats_repository.clone())),
            Arc::new(RecordDialogueCompletedHandler::new(stats_repository)),
        );

        let auth = AuthHandlers::new(
            Arc::new(SignInHandler::new(identity_provider.clone())),
            Arc::new(SignUpHandler::new(identity_provider)),
        );

        Self {
            dialogues,
            stats,
            auth,
            session_validator,
        }
    }
}

/// Cross-cutting HTTP settings.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Upper bound on one request, including the model call.
    pub request_timeout: Duration,
    /// Largest accepted request body in bytes.
    pub body_limit: usize,
    /// Allowed browser origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            body_limit: 16 * 1024,
            cors_origins: Vec::new(),
        }
    }
}

/// Builds the complete application router.
pub fn build_router(state: AppState, options: RouterOptions) -> Router {
    let api = Router::new()
        .nest("/api/dialogues", dialogue_routes(state.dialogues))
        .nest("/api/stats", stats_routes(state.stats))
        .nest("/api/auth", auth_routes(state.auth))
        .layer(DefaultBodyLimit::max(options.body_limit))
        .layer(middleware::from_fn_with_state(
            state.session_validator,
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(
            // ServiceBuilder layers run top to bottom
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors_layer(&options.cors_origins))
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(options.request_timeout)),
        )
}

/// GET /health - Liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(allowed)
}
