//! Axum route handlers for cost telemetry.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::config::PricingConfig;
use crate::state::AppState;

use super::LatestCall;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostMetricsResponse {
    pub total_cost: f64,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub pricing: PricingResponse,
    pub latest_ai_call: Option<LatestCall>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    pub input_tokens_per_million: f64,
    pub output_tokens_per_million: f64,
    pub currency: String,
}

impl PricingResponse {
    fn from_config(pricing: &PricingConfig) -> Self {
        Self {
            input_tokens_per_million: pricing.input_per_million,
            output_tokens_per_million: pricing.output_per_million,
            currency: pricing.currency.clone(),
        }
    }
}

/// GET /api/cost/metrics
///
/// Accumulated spend, token totals and the most recent call.
/// `latestAiCall` is null until the first model call completes.
pub async fn handle_cost_metrics(State(state): State<AppState>) -> Json<CostMetricsResponse> {
    let costs = &state.costs;
    Json(CostMetricsResponse {
        total_cost: costs.total_cost(),
        total_input_tokens: costs.total_input_tokens(),
        total_output_tokens: costs.total_output_tokens(),
        pricing: PricingResponse::from_config(costs.pricing()),
        latest_ai_call: costs.latest_call(),
    })
}

/// GET /api/cost/pricing
pub async fn handle_pricing(State(state): State<AppState>) -> Json<PricingResponse> {
    Json(PricingResponse::from_config(state.costs.pricing()))
}
