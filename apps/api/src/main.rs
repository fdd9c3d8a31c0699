use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum_prometheus::PrometheusMetricLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api::config::Config;
use api::cost::CostTracker;
use api::cv::loader::load_cv_dir;
use api::cv::CvStore;
use api::llm_client::OpenAiClient;
use api::matching::service::MatchService;
use api::prompts::PromptStore;
use api::routes::build_router;
use api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Analyzer API v{}", env!("CARGO_PKG_VERSION"));

    // Load the CV pool once at startup
    let report = load_cv_dir(&config.cv_dir)?;
    for failure in &report.failures {
        warn!("Skipping CV '{}': {}", failure.filename, failure.reason);
    }
    info!(
        "Loaded {} CVs from {}",
        report.cvs.len(),
        config.cv_dir.display()
    );
    if report.cvs.is_empty() {
        warn!("CV pool is empty; match requests will return no candidates");
    }
    let cv_load_failures = report.failures.len();
    let cvs = Arc::new(CvStore::new(report.cvs));

    // Initialize the prompt store (built-in defaults plus on-disk overrides)
    let prompts = Arc::new(PromptStore::load(&config.prompt_overrides_dir).await?);
    info!(
        "Prompt store initialized (overrides dir: {})",
        config.prompt_overrides_dir.display()
    );

    // Initialize cost tracking
    let costs = Arc::new(CostTracker::new(config.pricing.clone()));

    // Initialize LLM client
    let llm = Arc::new(OpenAiClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.openai_model.clone(),
    ));
    info!("LLM client initialized (model: {})", llm.model());

    let matcher = Arc::new(MatchService::new(
        llm,
        cvs.clone(),
        prompts.clone(),
        costs.clone(),
        config.rating,
    ));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();

    // Build app state
    let state = AppState {
        matcher,
        cvs,
        prompts,
        costs,
        rating: config.rating,
        metrics: Arc::new(prometheus_handle),
        cv_load_failures,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // TODO: tighten CORS in production
        .layer(prometheus_layer);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
