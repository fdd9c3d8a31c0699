use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::RatingConfig;
use crate::cost::CostTracker;
use crate::cv::ranker::find_top_candidates;
use crate::cv::{Cv, CvStore};
use crate::llm_client::{ChatCompleter, LlmError};
use crate::prompts::PromptStore;

/// How many candidates from the ranked pool are sent to the model.
pub const TOP_CANDIDATES: usize = 5;

/// One evaluated candidate in the match response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummary {
    pub name: String,
    pub filename: String,
    pub summary: String,
    pub rating: i32,
    pub min_rating: i32,
    pub max_rating: i32,
}

/// Orchestrates a match request: keyword-ranks the CV pool, then walks the
/// top candidates through a summary call and a rating call.
pub struct MatchService {
    llm: Arc<dyn ChatCompleter>,
    cvs: Arc<CvStore>,
    prompts: Arc<PromptStore>,
    costs: Arc<CostTracker>,
    rating: RatingConfig,
}

impl MatchService {
    pub fn new(
        llm: Arc<dyn ChatCompleter>,
        cvs: Arc<CvStore>,
        prompts: Arc<PromptStore>,
        costs: Arc<CostTracker>,
        rating: RatingConfig,
    ) -> Self {
        Self {
            llm,
            cvs,
            prompts,
            costs,
            rating,
        }
    }

    /// Evaluates the vacancy against the CV pool and returns the top
    /// candidates in rank order. The first model failure aborts the whole
    /// request; partial results are never returned.
    pub async fn match_candidates(
        &self,
        vacancy_description: &str,
    ) -> Result<Vec<CandidateSummary>, LlmError> {
        let ranked = find_top_candidates(self.cvs.all(), vacancy_description, TOP_CANDIDATES);
        info!(
            "Evaluating {} of {} CVs for vacancy",
            ranked.len(),
            self.cvs.len()
        );

        let mut results = Vec::with_capacity(ranked.len());
        for cv in ranked {
            let summary = self.generate_summary(vacancy_description, cv).await?;
            let rating = self.generate_rating(vacancy_description, cv).await?;
            debug!("Evaluated candidate '{}': rating {}", cv.name, rating);
            results.push(CandidateSummary {
                name: cv.name.clone(),
                filename: cv.filename.clone(),
                summary,
                rating,
                min_rating: self.rating.min,
                max_rating: self.rating.max,
            });
        }
        Ok(results)
    }

    async fn generate_summary(
        &self,
        vacancy_description: &str,
        cv: &Cv,
    ) -> Result<String, LlmError> {
        let system = self.prompts.summary_system().await;
        let user = render_placeholders(
            &self.prompts.summary_user().await,
            vacancy_description,
            &cv.content,
        );

        let completion = self.llm.complete(&system, &user).await?;
        self.costs
            .record(completion.input_tokens, completion.output_tokens);
        Ok(completion.content)
    }

    async fn generate_rating(
        &self,
        vacancy_description: &str,
        cv: &Cv,
    ) -> Result<i32, LlmError> {
        let system = self.prompts.rating_system(self.rating).await;
        let user = render_placeholders(
            &self.prompts.rating_user(self.rating).await,
            vacancy_description,
            &cv.content,
        );

        let completion = self.llm.complete(&system, &user).await?;
        self.costs
            .record(completion.input_tokens, completion.output_tokens);
        Ok(extract_rating(&completion.content, self.rating))
    }
}

/// Fills the per-request placeholders in a prompt template. Placeholders
/// without a known value are left in place.
fn render_placeholders(template: &str, vacancy_description: &str, cv_content: &str) -> String {
    template
        .replace("{{vacancy_description}}", vacancy_description)
        .replace("{{cv_content}}", cv_content)
}

/// Pulls a rating out of free-form model output. The first run of digits in
/// the reply is parsed and clamped into the configured range; a reply with no
/// digits (or a number too large to parse) falls back to the minimum.
pub fn extract_rating(content: &str, rating: RatingConfig) -> i32 {
    let digits: String = content
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits
        .parse::<i64>()
        .map(|value| value.clamp(i64::from(rating.min), i64::from(rating.max)) as i32)
        .unwrap_or(rating.min)
}
