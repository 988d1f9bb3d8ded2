//! Route table and health endpoints.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::api;
use crate::app_state::AppState;

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readyz(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> Json<serde_json::Value> {
    // The store is the only stateful dependency worth probing; the oracle is
    // checked lazily at submission time.
    match state.attempts.list_all().await {
        Ok(_) => Json(json!({ "status": "ready" })),
        Err(e) => Json(json!({ "status": "degraded", "detail": e.to_string() })),
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/api/problems", get(api::problems::list_problems))
        .route("/api/problems/{id}", get(api::problems::get_problem))
        .route(
            "/api/problems/{id}/explanation",
            get(api::problems::get_explanation),
        )
        .route(
            "/api/problems/{id}/submit",
            post(api::attempts::submit_attempt),
        )
        .route("/api/analytics", get(api::analytics::get_analytics))
        .route(
            "/api/assessments",
            post(api::assessments::create_assessment).get(api::assessments::list_assessments),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
