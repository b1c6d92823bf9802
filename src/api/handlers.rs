//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::info;

use super::responses::{ApiResponse, CommandRequest, HealthResponse, TimersResponse};
use crate::{
    assistant::{Assistant, Outcome, HELP_TEXT, NOT_UNDERSTOOD},
    services::TimerStore,
};

/// Handle POST /command - interpret and run a line of text
pub async fn command_handler<S: TimerStore>(
    State(assistant): State<Arc<Assistant<S>>>,
    Json(request): Json<CommandRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    info!("Command endpoint called with {:?}", request.text);

    let outcome = assistant.handle_text(&request.text).await;
    let (code, message) = match &outcome {
        Outcome::Executed(_) => (StatusCode::OK, format!("Executed: {}", request.text.trim())),
        Outcome::Ignored => (StatusCode::OK, String::new()),
        Outcome::Help => (StatusCode::OK, HELP_TEXT.to_string()),
        Outcome::Unrecognized => (StatusCode::UNPROCESSABLE_ENTITY, NOT_UNDERSTOOD.to_string()),
        Outcome::Failed(e) => (StatusCode::CONFLICT, format!("Error: {}", e)),
    };

    (code, Json(ApiResponse::new(outcome.status(), message, assistant.snapshot())))
}

/// Handle GET /timers - return the full registry
pub async fn timers_handler<S: TimerStore>(
    State(assistant): State<Arc<Assistant<S>>>,
) -> Json<TimersResponse> {
    Json(TimersResponse::new(assistant.snapshot()))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
