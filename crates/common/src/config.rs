use crate::error::BizToneError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default Groq (OpenAI-compatible) endpoint
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default chat model
pub const DEFAULT_LLM_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

/// BizTone application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Groq API key. `None` keeps the server up but every conversion fails.
    #[serde(skip_serializing)]
    pub groq_api_key: Option<String>,

    /// Chat completion API base URL
    pub groq_base_url: String,

    /// Chat model name
    pub llm_model: String,

    /// Upstream request timeout in seconds
    pub llm_timeout_secs: u64,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Static frontend directory
    pub frontend_dir: PathBuf,

    /// Log directory (console only when unset)
    pub log_dir: Option<PathBuf>,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            groq_api_key: None,
            groq_base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_timeout_secs: 60,
            server_host: "127.0.0.1".to_string(),
            server_port: 5000,
            frontend_dir: PathBuf::from("./frontend"),
            log_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, BizToneError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();
        let config = Self {
            groq_api_key: std::env::var("GROQ_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            groq_base_url: std::env::var("GROQ_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.groq_base_url),
            llm_model: std::env::var("LLM_MODEL").unwrap_or(defaults.llm_model),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.llm_timeout_secs),
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.server_port),
            frontend_dir: Self::get_env_path("FRONTEND_DIR").unwrap_or(defaults.frontend_dir),
            log_dir: Self::get_env_path("LOG_DIR"),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key)
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    }

    /// Whether an upstream API key was supplied
    pub fn has_api_key(&self) -> bool {
        self.groq_api_key.is_some()
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    ///
    /// A missing API key is not an error here; the server starts and
    /// reports a configuration error per request instead.
    pub fn validate(&self) -> Result<(), BizToneError> {
        if !self.groq_base_url.starts_with("http://")
            && !self.groq_base_url.starts_with("https://") {
            return Err(BizToneError::config(
                "Groq base URL must start with http:// or https://"
            ));
        }

        if self.llm_model.trim().is_empty() {
            return Err(BizToneError::config("LLM model name cannot be empty"));
        }

        if self.llm_timeout_secs == 0 {
            return Err(BizToneError::config("LLM timeout cannot be 0"));
        }

        if self.server_port == 0 {
            return Err(BizToneError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}
