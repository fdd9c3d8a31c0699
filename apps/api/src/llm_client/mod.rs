//! Chat completion gateway: the single point of entry for all model calls.
//!
//! ARCHITECTURAL RULE: no other module may call the provider API directly.
//! All model interactions MUST go through `ChatCompleter`, so cost tracking
//! sees every call.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const MAX_RETRIES: u32 = 3;

// ────────────────────────────────────────────────────────────────────────────
// Error types
// ────────────────────────────────────────────────────────────────────────────

/// How the provider rejected a call. Derived from the HTTP status code at the
/// point of failure, never from matching on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    RateLimited,
    Unauthorized,
    Forbidden,
    NotFound,
    InvalidRequest,
    Upstream,
}

impl ProviderErrorKind {
    fn from_status(status: u16) -> Self {
        match status {
            429 => ProviderErrorKind::RateLimited,
            401 => ProviderErrorKind::Unauthorized,
            403 => ProviderErrorKind::Forbidden,
            404 => ProviderErrorKind::NotFound,
            400 | 422 => ProviderErrorKind::InvalidRequest,
            _ => ProviderErrorKind::Upstream,
        }
    }

    /// Transient failures (provider 5xx) are retried; everything else is a
    /// property of the request or the account and fails fast.
    fn is_transient(self) -> bool {
        matches!(self, ProviderErrorKind::Upstream)
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider error (status {status}): {message}")]
    Provider {
        kind: ProviderErrorKind,
        status: u16,
        message: String,
    },

    #[error("no response after {retries} retries")]
    RetriesExhausted { retries: u32 },

    #[error("model returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// Classification used at the HTTP boundary to pick a response status.
    /// Transport and parse failures count as upstream trouble.
    pub fn kind(&self) -> ProviderErrorKind {
        match self {
            LlmError::Provider { kind, .. } => *kind,
            _ => ProviderErrorKind::Upstream,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (OpenAI-compatible chat completions)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// One completed chat call: the model's text plus the token usage the
/// provider reported. Counts are zero when the provider omits usage data.
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    pub content: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// The chat completion seam. Implement this to swap providers (or stub the
/// model in tests) without touching orchestration or handler code.
///
/// Carried in `MatchService` as `Arc<dyn ChatCompleter>`.
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<ChatCompletion, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAI-compatible client
// ────────────────────────────────────────────────────────────────────────────

/// Chat client for OpenAI-compatible completion APIs.
/// Wraps `POST /chat/completions` with retry logic for transient failures.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatCompleter for OpenAiClient {
    /// Makes one chat completion call with a system and a user message.
    /// Retries transport errors and 5xx responses with exponential backoff;
    /// auth, rate-limit and bad-request rejections return immediately.
    async fn complete(&self, system: &str, user: &str) -> Result<ChatCompletion, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let url = format!("{}/chat/completions", self.base_url);
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Chat call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let kind = ProviderErrorKind::from_status(status.as_u16());
                // Pull the human-readable message out of the error envelope
                let message = serde_json::from_str::<ProviderError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                let error = LlmError::Provider {
                    kind,
                    status: status.as_u16(),
                    message,
                };

                if kind.is_transient() {
                    warn!("Chat API returned {status}: {error}");
                    last_error = Some(error);
                    continue;
                }

                return Err(error);
            }

            let chat_response: ChatResponse = response.json().await?;
            let completion = extract_completion(chat_response)?;

            debug!(
                "Chat call succeeded: input_tokens={}, output_tokens={}",
                completion.input_tokens, completion.output_tokens
            );

            return Ok(completion);
        }

        Err(last_error.unwrap_or(LlmError::RetriesExhausted {
            retries: MAX_RETRIES,
        }))
    }
}

/// Extracts text and usage from a response body. A missing usage block counts
/// as zero tokens; missing or blank message content is an error.
fn extract_completion(response: ChatResponse) -> Result<ChatCompletion, LlmError> {
    let usage = response.usage.unwrap_or_default();

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or(LlmError::EmptyContent)?;

    Ok(ChatCompletion {
        content,
        input_tokens: usage.prompt_tokens,
        output_tokens: usage.completion_tokens,
    })
}
