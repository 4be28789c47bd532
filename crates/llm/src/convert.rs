use biztone_common::{BizToneError, Result};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::llm_trait::CompletionProvider;
use crate::normalize::normalize_completion;
use crate::prompts::{user_message, Persona};
use crate::types::{ChatCompletionRequest, ChatMessage, ConversionRequest, ConversionResult};

/// Maximum input length in characters
pub const MAX_KEYWORDS_CHARS: usize = 500;

/// Sampling parameters for conversion calls
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl ConversionOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            // Low temperature: consistent phrasing over variety
            temperature: 0.3,
            max_tokens: 500,
            top_p: 1.0,
        }
    }
}

/// Business tone converter
///
/// Validates the request, builds the persona prompt, calls the provider once
/// and normalizes the first choice.
#[derive(Clone)]
pub struct Converter {
    provider: Option<Arc<dyn CompletionProvider>>,
    options: ConversionOptions,
}

impl Converter {
    /// Create new converter. `None` means no API key was configured.
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>, options: ConversionOptions) -> Self {
        Self { provider, options }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Name of the configured provider, if any
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|provider| provider.name())
    }

    pub fn model(&self) -> &str {
        &self.options.model
    }

    /// Convert free-form text into a business message
    pub async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult> {
        let Some(provider) = self.provider.as_ref() else {
            error!("Completion provider not initialized (GROQ_API_KEY missing)");
            return Err(BizToneError::config("completion provider not initialized"));
        };

        let (keywords, persona_id) = validate(request)?;
        let length = keywords.chars().count();

        info!(
            "Received conversion request. Persona: {}, Length: {}, Provider: {}",
            persona_id,
            length,
            provider.name()
        );

        let persona = Persona::from_id(persona_id);

        let chat_request = self.build_request(persona, keywords);

        let response = provider.chat_completion(&chat_request).await.map_err(|e| {
            log_failure(&e);
            e
        })?;

        let Some(content) = response.first_content() else {
            let e = BizToneError::api("no message content in first choice");
            log_failure(&e);
            return Err(e);
        };

        let converted_message = normalize_completion(content);
        debug!("Normalized completion - Length: {}", converted_message.chars().count());

        info!("Conversion successful.");
        Ok(ConversionResult { converted_message })
    }

    /// Build the single non-streaming completion request
    pub fn build_request(&self, persona: Persona, keywords: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.options.model.clone(),
            messages: vec![
                ChatMessage::system(persona.system_prompt()),
                ChatMessage::user(user_message(keywords)),
            ],
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
            top_p: self.options.top_p,
            stop: None,
            stream: false,
        }
    }
}

/// Input checks in order; the first failure wins
fn validate(request: &ConversionRequest) -> Result<(&str, &str)> {
    let keywords = request.keywords.as_deref().unwrap_or_default();
    if keywords.is_empty() {
        return Err(BizToneError::invalid_input("변환할 내용을 입력해주세요."));
    }

    if keywords.chars().count() > MAX_KEYWORDS_CHARS {
        return Err(BizToneError::invalid_input(format!(
            "입력 내용은 {}자를 초과할 수 없습니다.",
            MAX_KEYWORDS_CHARS
        )));
    }

    let persona = request.persona.as_deref().unwrap_or_default();
    if persona.is_empty() {
        return Err(BizToneError::invalid_input("대상을 선택해주세요."));
    }

    Ok((keywords, persona))
}

fn log_failure(e: &BizToneError) {
    match e {
        BizToneError::RateLimited(_) => error!("Rate limit exceeded: {}", e),
        BizToneError::Connection(_) => error!("API connection error: {}", e),
        BizToneError::Api(_) => error!("Groq API error: {}", e),
        _ => error!("Unexpected error: {:?}", e),
    }
}
