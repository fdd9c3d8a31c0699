//! Axum route handlers for the prompt admin API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;

use super::store::PromptSnapshot;
use super::{PromptError, PromptRole, PromptType};

#[derive(Debug, Deserialize)]
pub struct PromptUpdateRequest {
    #[serde(rename = "type")]
    pub prompt_type: String,
    pub role: String,
    pub content: String,
}

/// GET /api/admin/prompts
///
/// Lists all four template slots with their current content and source.
pub async fn handle_list_prompts(State(state): State<AppState>) -> Json<Vec<PromptSnapshot>> {
    Json(state.prompts.all().await)
}

/// GET /api/admin/prompts/:type/:role
pub async fn handle_get_prompt(
    State(state): State<AppState>,
    Path((prompt_type, role)): Path<(String, String)>,
) -> Result<Json<PromptSnapshot>, AppError> {
    let (prompt_type, role) = parse_slot(&prompt_type, &role)?;
    Ok(Json(state.prompts.snapshot(prompt_type, role).await))
}

/// PUT /api/admin/prompts
///
/// Replaces one template's content and persists it across restarts.
pub async fn handle_update_prompt(
    State(state): State<AppState>,
    Json(request): Json<PromptUpdateRequest>,
) -> Result<Json<PromptSnapshot>, AppError> {
    let (prompt_type, role) = parse_slot(&request.prompt_type, &request.role)?;
    let snapshot = state
        .prompts
        .update(prompt_type, role, &request.content)
        .await?;
    Ok(Json(snapshot))
}

/// POST /api/admin/prompts/:type/:role/reset
///
/// Restores one template to its built-in default.
pub async fn handle_reset_prompt(
    State(state): State<AppState>,
    Path((prompt_type, role)): Path<(String, String)>,
) -> Result<Json<PromptSnapshot>, AppError> {
    let (prompt_type, role) = parse_slot(&prompt_type, &role)?;
    Ok(Json(state.prompts.reset(prompt_type, role).await?))
}

/// POST /api/admin/prompts/refresh
///
/// Rereads every template from storage, picking up out-of-band file edits.
pub async fn handle_refresh_prompts(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    state.prompts.refresh().await?;
    Ok(Json(json!({ "message": "Prompts refreshed successfully" })))
}

fn parse_slot(prompt_type: &str, role: &str) -> Result<(PromptType, PromptRole), PromptError> {
    Ok((prompt_type.parse()?, role.parse()?))
}
