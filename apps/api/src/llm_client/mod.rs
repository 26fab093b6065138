//! Completion client — the single point of entry for all YandexGPT calls.
//!
//! ARCHITECTURAL RULE: no other module may call the Foundation Models API
//! directly. All model interactions MUST go through this module.
//!
//! Model: yandexgpt-lite (hardcoded — do not make configurable to prevent drift)

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub mod iam;

use crate::config::Config;
use iam::TokenProvider;

const COMPLETION_URL: &str = "https://llm.api.cloud.yandex.net/foundationModels/v1/completion";
/// The model used for all completion calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "yandexgpt-lite";
const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 1500;
/// Attempt budget for one `complete` call, shared across every retry branch.
/// Auth refreshes retry immediately but still consume from this budget.
const MAX_ATTEMPTS: u32 = 3;

/// System instruction sent with every completion request.
const SYSTEM_INSTRUCTION: &str =
    "Ты профессиональный HR-специалист. Создай четкое резюме на русском языке.";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("completion response contained no alternative with text")]
    EmptyCompletion,

    #[error("completion failed after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: Box<ProviderError>,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (Foundation Models completion API)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequest<'a> {
    model_uri: &'a str,
    completion_options: CompletionOptions,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionOptions {
    stream: bool,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    result: CompletionResult,
}

#[derive(Debug, Deserialize)]
struct CompletionResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    message: Option<AlternativeMessage>,
}

#[derive(Debug, Deserialize)]
struct AlternativeMessage {
    #[serde(default)]
    text: String,
}

impl CompletionResponse {
    /// Extracts the text of the first alternative. Everything else in the
    /// response (usage, model version, further alternatives) is discarded.
    fn into_text(self) -> Option<String> {
        self.result
            .alternatives
            .into_iter()
            .next()
            .and_then(|a| a.message)
            .map(|m| m.text)
            .filter(|t| !t.is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The completion client used by the resume service.
///
/// Owns the bearer credential for its lifetime: the token is acquired lazily
/// from the [`TokenProvider`] on first use and replaced in place after a 401.
/// The mutex serializes the read-then-write so a shared instance never
/// interleaves a stale token with a refresh.
pub struct GptClient {
    http: Client,
    tokens: Arc<dyn TokenProvider>,
    token: Mutex<Option<String>>,
    completion_url: String,
    folder_id: String,
    model_uri: String,
    retry_interval: Duration,
}

impl GptClient {
    pub fn new(config: &Config, tokens: Arc<dyn TokenProvider>) -> Self {
        Self::with_endpoint(COMPLETION_URL.to_string(), config, tokens)
    }

    /// Same as [`GptClient::new`] but with an explicit completion endpoint.
    /// Tests point this at a local mock server.
    pub fn with_endpoint(
        completion_url: String,
        config: &Config,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            tokens,
            token: Mutex::new(None),
            completion_url,
            model_uri: format!("gpt://{}/{}", config.folder_id, MODEL),
            folder_id: config.folder_id.clone(),
            retry_interval: Duration::from_millis(config.retry_interval_ms),
        }
    }

    /// Sends one prompt to the completion endpoint and returns the text of the
    /// first alternative.
    ///
    /// Per-call state machine: Sending → Success | AuthExpired → Sending |
    /// TransientError → Sending | Failed. All transitions back to Sending draw
    /// from the same MAX_ATTEMPTS budget:
    /// - 401: refresh the credential through the provider and retry
    ///   immediately, no sleep;
    /// - transport errors and bodies without extractable text: sleep
    ///   `retry_interval`, then retry;
    /// - any other non-success status: fail immediately with the status and
    ///   body preserved.
    pub async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request_body = CompletionRequest {
            model_uri: &self.model_uri,
            completion_options: CompletionOptions {
                stream: false,
                temperature: TEMPERATURE,
                max_tokens: MAX_TOKENS,
            },
            messages: vec![
                Message {
                    role: "system",
                    text: SYSTEM_INSTRUCTION,
                },
                Message {
                    role: "user",
                    text: prompt,
                },
            ],
        };

        let mut token = self.current_token().await;
        let mut last_error: Option<ProviderError> = None;

        for attempt in 1..=MAX_ATTEMPTS {
            debug!("Sending completion request (attempt {attempt}/{MAX_ATTEMPTS})");

            let response = self
                .http
                .post(&self.completion_url)
                .bearer_auth(&token)
                .header("x-folder-id", &self.folder_id)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    warn!("Completion request failed: {e}");
                    last_error = Some(ProviderError::Http(e));
                    self.pause_before_retry(attempt).await;
                    continue;
                }
            };

            let status = response.status();

            if status == StatusCode::UNAUTHORIZED {
                let message = response.text().await.unwrap_or_default();
                warn!("Completion endpoint rejected the credential, refreshing");
                token = self.refresh_token().await;
                last_error = Some(ProviderError::Api {
                    status: status.as_u16(),
                    message,
                });
                continue; // immediate retry; the attempt still counts
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(ProviderError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            match response.json::<CompletionResponse>().await {
                Ok(parsed) => match parsed.into_text() {
                    Some(text) => {
                        debug!("Completion succeeded ({} chars)", text.len());
                        return Ok(text);
                    }
                    None => {
                        warn!("Completion response contained no usable alternatives");
                        last_error = Some(ProviderError::EmptyCompletion);
                        self.pause_before_retry(attempt).await;
                    }
                },
                Err(e) => {
                    warn!("Failed to decode completion response: {e}");
                    last_error = Some(ProviderError::Http(e));
                    self.pause_before_retry(attempt).await;
                }
            }
        }

        Err(ProviderError::Exhausted {
            attempts: MAX_ATTEMPTS,
            source: Box::new(last_error.unwrap_or(ProviderError::EmptyCompletion)),
        })
    }

    async fn pause_before_retry(&self, attempt: u32) {
        if attempt < MAX_ATTEMPTS {
            tokio::time::sleep(self.retry_interval).await;
        }
    }

    /// Returns the cached credential, asking the provider on first use.
    async fn current_token(&self) -> String {
        let mut guard = self.token.lock().await;
        match guard.as_ref() {
            Some(token) => token.clone(),
            None => {
                let fresh = self.tokens.obtain().await;
                *guard = Some(fresh.clone());
                fresh
            }
        }
    }

    /// Replaces the cached credential with a freshly obtained one.
    async fn refresh_token(&self) -> String {
        let mut guard = self.token.lock().await;
        let fresh = self.tokens.obtain().await;
        *guard = Some(fresh.clone());
        fresh
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
