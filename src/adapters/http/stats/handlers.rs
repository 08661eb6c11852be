//! HTTP handlers for practice statistics endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{domain_error_response, json_rejection_response};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::stats::{
    GetStatsHandler, RecordDialogueCompletedHandler, RecordPracticeCommand, RecordPracticeHandler,
};
use crate::domain::dialogue::Language;
use crate::domain::foundation::{ErrorCode, UserId, ValidationError};
use crate::domain::practice::PracticeMode;

use super::dto::{RecordPracticeRequest, StatsResponse};

#[derive(Clone)]
pub struct StatsHandlers {
    get_handler: Arc<GetStatsHandler>,
    record_practice_handler: Arc<RecordPracticeHandler>,
    record_completed_handler: Arc<RecordDialogueCompletedHandler>,
}

impl StatsHandlers {
    pub fn new(
        get_handler: Arc<GetStatsHandler>,
        record_practice_handler: Arc<RecordPracticeHandler>,
        record_completed_handler: Arc<RecordDialogueCompletedHandler>,
    ) -> Self {
        Self {
            get_handler,
            record_practice_handler,
            record_completed_handler,
        }
    }
}

/// GET /api/stats - Practice statistics of the caller
pub async fn get_stats(
    State(handlers): State<StatsHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.get_handler.handle(&user.id).await {
        Ok(stats) => (StatusCode::OK, Json(StatsResponse::from(stats))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// POST /api/stats - Record one practice session
pub async fn record_practice(
    State(handlers): State<StatsHandlers>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<RecordPracticeRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return json_rejection_response(&ErrorCode::ValidationFailed.to_string(), rejection)
        }
    };
    let cmd = match to_command(user.id, req) {
        Ok(cmd) => cmd,
        Err(e) => return domain_error_response(e.into()),
    };

    match handlers.record_practice_handler.handle(cmd).await {
        Ok(stats) => (StatusCode::OK, Json(StatsResponse::from(stats))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// POST /api/stats/dialogue-completed - Count one finished dialogue
pub async fn record_dialogue_completed(
    State(handlers): State<StatsHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.record_completed_handler.handle(&user.id).await {
        Ok(stats) => (StatusCode::OK, Json(StatsResponse::from(stats))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

fn to_command(
    user_id: UserId,
    req: RecordPracticeRequest,
) -> Result<RecordPracticeCommand, ValidationError> {
    let language = req
        .language
        .as_deref()
        .map(str::parse::<Language>)
        .transpose()?;
    let mode = req
        .mode
        .as_deref()
        .map(str::parse::<PracticeMode>)
        .transpose()?;

    Ok(RecordPracticeCommand {
        user_id,
        practice_secs: req.practice_time,
        language,
        mode,
    })
}
