use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

use super::service::CandidateSummary;

const MIN_DESCRIPTION_CHARS: usize = 10;
const MAX_DESCRIPTION_CHARS: usize = 10_000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub vacancy_description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingConfigResponse {
    pub min_rating: i32,
    pub max_rating: i32,
    pub range_description: String,
}

/// POST /api/candidate-matcher/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<Vec<CandidateSummary>>, AppError> {
    validate_description(&request.vacancy_description)?;
    info!(
        "Received match request ({} chars)",
        request.vacancy_description.chars().count()
    );

    let candidates = state
        .matcher
        .match_candidates(&request.vacancy_description)
        .await?;
    Ok(Json(candidates))
}

/// GET /api/rating/config
pub async fn handle_rating_config(State(state): State<AppState>) -> Json<RatingConfigResponse> {
    Json(RatingConfigResponse {
        min_rating: state.rating.min,
        max_rating: state.rating.max,
        range_description: state.rating.range_description(),
    })
}

fn validate_description(description: &str) -> Result<(), AppError> {
    if description.trim().is_empty() {
        return Err(AppError::Validation(
            "Vacancy description cannot be blank".to_string(),
        ));
    }
    let length = description.chars().count();
    if !(MIN_DESCRIPTION_CHARS..=MAX_DESCRIPTION_CHARS).contains(&length) {
        return Err(AppError::Validation(format!(
            "Vacancy description must be between {MIN_DESCRIPTION_CHARS} and {MAX_DESCRIPTION_CHARS} characters"
        )));
    }
    Ok(())
}
