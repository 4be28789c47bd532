use biztone_common::{AppConfig, Result};
use biztone_llm::{CompletionProvider, ConversionOptions, Converter, GroqClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Shared application state
///
/// Read-only after startup; requests share it without locking.
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Business tone converter
    pub converter: Converter,
}

impl AppState {
    /// Create new application state, building the Groq client when a key is set
    pub fn new(config: AppConfig) -> Result<Self> {
        let provider: Option<Arc<dyn CompletionProvider>> = match &config.groq_api_key {
            Some(api_key) => Some(Arc::new(GroqClient::new(
                config.groq_base_url.clone(),
                api_key.clone(),
                Duration::from_secs(config.llm_timeout_secs),
            )?)),
            None => {
                warn!("GROQ_API_KEY not found. Groq API calls will fail.");
                None
            }
        };

        let converter = Converter::new(provider, ConversionOptions::new(config.llm_model.clone()));
        Ok(Self::with_converter(config, converter))
    }

    /// Create state around an existing converter
    pub fn with_converter(config: AppConfig, converter: Converter) -> Self {
        Self { config, converter }
    }
}
