//! HTTP command surface

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use timer_assistant::{
    create_router,
    services::{MemoryStore, Recorder},
    Assistant,
};
use tower::ServiceExt;

fn router() -> (Router, Arc<Assistant<MemoryStore>>) {
    let assistant = Arc::new(Assistant::new(Recorder::new().services(), MemoryStore::new()));
    (create_router(Arc::clone(&assistant)), assistant)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn command(text: &str) -> Request<Body> {
    Request::post("/command")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "text": text }).to_string()))
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn command_creates_timer_and_returns_registry() {
    let (router, _) = router();
    let (status, body) = send(&router, command("set a 5 minute timer for coffee break")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Executed: set a 5 minute timer for coffee break");
    assert_eq!(body["timers"]["coffee break"]["remaining"], 300);
    assert_eq!(body["timers"]["coffee break"]["running"], true);
}

#[tokio::test(start_paused = true)]
async fn command_errors_are_reported() {
    let (router, _) = router();

    let (status, body) = send(&router, command("gibberish")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "unrecognized");

    let (status, body) = send(&router, command("pause the coffee timer")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Error: Timer 'coffee' does not exist");
}

#[tokio::test(start_paused = true)]
async fn timers_endpoint_returns_snapshot() {
    let (router, assistant) = router();
    assistant.handle_text("10 min tea").await;
    assistant.handle_text("pause tea").await;

    let request = Request::get("/timers").body(Body::empty()).unwrap();
    let (status, body) = send(&router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["timers"]["tea"]["paused"], true);
    assert_eq!(body["timers"]["tea"]["duration"], 600);
}

#[tokio::test(start_paused = true)]
async fn health_check() {
    let (router, _) = router();
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
