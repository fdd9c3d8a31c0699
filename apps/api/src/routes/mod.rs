pub mod health;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::cost::handlers as cost_handlers;
use crate::matching::handlers as match_handlers;
use crate::prompts::handlers as prompt_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/metrics", get(metrics_handler))
        // Candidate matching
        .route(
            "/api/candidate-matcher/match",
            post(match_handlers::handle_match),
        )
        .route(
            "/api/rating/config",
            get(match_handlers::handle_rating_config),
        )
        // Cost telemetry
        .route("/api/cost/metrics", get(cost_handlers::handle_cost_metrics))
        .route("/api/cost/pricing", get(cost_handlers::handle_pricing))
        // Prompt administration
        .route(
            "/api/admin/prompts",
            get(prompt_handlers::handle_list_prompts).put(prompt_handlers::handle_update_prompt),
        )
        .route(
            "/api/admin/prompts/refresh",
            post(prompt_handlers::handle_refresh_prompts),
        )
        .route(
            "/api/admin/prompts/:prompt_type/:role",
            get(prompt_handlers::handle_get_prompt),
        )
        .route(
            "/api/admin/prompts/:prompt_type/:role/reset",
            post(prompt_handlers::handle_reset_prompt),
        )
        .route("/api/admin/status", get(admin_status_handler))
        .with_state(state)
}

async fn admin_status_handler() -> Json<Value> {
    Json(json!({ "status": "Admin panel is accessible" }))
}

async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
