use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::RatingConfig;
use crate::cost::CostTracker;
use crate::cv::CvStore;
use crate::matching::service::MatchService;
use crate::prompts::PromptStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<MatchService>,
    pub cvs: Arc<CvStore>,
    pub prompts: Arc<PromptStore>,
    pub costs: Arc<CostTracker>,
    pub rating: RatingConfig,
    pub metrics: Arc<PrometheusHandle>,
    /// Files that failed extraction at startup, surfaced in the health report.
    pub cv_load_failures: usize,
}
