use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub cv_dir: PathBuf,
    pub prompt_overrides_dir: PathBuf,
    pub rating: RatingConfig,
    pub pricing: PricingConfig,
    pub port: u16,
    pub rust_log: String,
}

/// Bounds of the candidate rating scale. Ratings returned by the model are
/// clamped into `[min, max]`.
#[derive(Debug, Clone, Copy)]
pub struct RatingConfig {
    pub min: i32,
    pub max: i32,
}

impl RatingConfig {
    /// Human-readable scale description injected into prompt templates,
    /// e.g. "1 to 10".
    pub fn range_description(&self) -> String {
        format!("{} to {}", self.min, self.max)
    }
}

/// Per-million-token rates used to convert usage into money.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub input_per_million: f64,
    pub output_per_million: f64,
    pub currency: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            cv_dir: PathBuf::from(std::env::var("CV_DIR").unwrap_or_else(|_| "cvs".to_string())),
            prompt_overrides_dir: PathBuf::from(
                std::env::var("PROMPT_OVERRIDES_DIR")
                    .unwrap_or_else(|_| "data/prompt-overrides".to_string()),
            ),
            rating: RatingConfig {
                min: std::env::var("RATING_MIN")
                    .unwrap_or_else(|_| "1".to_string())
                    .parse::<i32>()
                    .context("RATING_MIN must be an integer")?,
                max: std::env::var("RATING_MAX")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse::<i32>()
                    .context("RATING_MAX must be an integer")?,
            },
            pricing: PricingConfig {
                input_per_million: std::env::var("PRICING_INPUT_PER_MILLION")
                    .unwrap_or_else(|_| "2.50".to_string())
                    .parse::<f64>()
                    .context("PRICING_INPUT_PER_MILLION must be a number")?,
                output_per_million: std::env::var("PRICING_OUTPUT_PER_MILLION")
                    .unwrap_or_else(|_| "10.00".to_string())
                    .parse::<f64>()
                    .context("PRICING_OUTPUT_PER_MILLION must be a number")?,
                currency: std::env::var("PRICING_CURRENCY").unwrap_or_else(|_| "USD".to_string()),
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        };

        if config.rating.min >= config.rating.max {
            bail!(
                "RATING_MIN ({}) must be less than RATING_MAX ({})",
                config.rating.min,
                config.rating.max
            );
        }

        Ok(config)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
