//! HTTP API module
//!
//! The command surface for remote clients: send text, read back the registry.

pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{assistant::Assistant, services::TimerStore};
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router<S: TimerStore + 'static>(assistant: Arc<Assistant<S>>) -> Router {
    Router::new()
        .route("/command", post(command_handler::<S>))
        .route("/timers", get(timers_handler::<S>))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(assistant)
}
