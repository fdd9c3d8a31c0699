use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and CV pool counts.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": "0.1.0",
        "service": "cv-analyzer-api",
        "cvsLoaded": state.cvs.len(),
        "cvLoadFailures": state.cv_load_failures,
    }))
}
