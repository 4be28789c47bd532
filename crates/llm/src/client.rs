use async_trait::async_trait;
use biztone_common::{BizToneError, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info};

use crate::llm_trait::CompletionProvider;
use crate::types::{ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse};

/// Groq chat completion client (OpenAI-compatible API)
#[derive(Clone)]
pub struct GroqClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl std::fmt::Debug for GroqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GroqClient {
    /// Create new Groq client
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BizToneError::config(format!("Failed to create HTTP client: {}", e)))?;

        info!("Groq client initialized: {}", base_url);
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            client,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionProvider for GroqClient {
    /// Single attempt, no retry. Failures surface to the caller immediately.
    async fn chat_completion(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        debug!(
            "Sending chat completion - Model: {}, Messages: {}",
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| BizToneError::api(format!("Failed to parse response: {}", e)))?;

        debug!(
            "Received chat completion - Model: {}, Choices: {}",
            result.model,
            result.choices.len()
        );

        Ok(result)
    }

    fn name(&self) -> &str {
        "groq"
    }
}

/// Transport failures never reached the API, so they all count as connectivity.
fn classify_send_error(e: reqwest::Error) -> BizToneError {
    if e.is_timeout() {
        BizToneError::connection(format!("Request timed out: {}", e))
    } else if e.is_connect() {
        BizToneError::connection(format!("Connection failed: {}", e))
    } else {
        BizToneError::connection(e.to_string())
    }
}

/// Map a non-2xx API response to the error taxonomy
pub(crate) fn classify_status(status: StatusCode, body: &str) -> BizToneError {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string());

    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            BizToneError::rate_limited(format!("HTTP {}: {}", status.as_u16(), detail))
        }
        _ => BizToneError::api(format!("HTTP {}: {}", status.as_u16(), detail)),
    }
}
