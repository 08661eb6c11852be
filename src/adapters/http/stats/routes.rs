//! HTTP routes for practice statistics endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_stats, record_dialogue_completed, record_practice, StatsHandlers};

/// Creates the stats router, mounted at `/api/stats`.
pub fn stats_routes(handlers: StatsHandlers) -> Router {
    Router::new()
        .route("/", get(get_stats).post(record_practice))
        .route("/dialogue-completed", post(record_dialogue_completed))
        .with_state(handlers)
}
