/// BizTone error types
#[derive(Debug, thiserror::Error)]
pub enum BizToneError {
    /// Configuration error (missing API key, bad settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input. Carries the message shown to the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Upstream rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Upstream unreachable (connect failure, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Upstream API returned an error or an unusable response
    #[error("API error: {0}")]
    Api(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BizToneError {
    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create rate limit error
    pub fn rate_limited<S: Into<String>>(msg: S) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create connection error
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        Self::Connection(msg.into())
    }

    /// Create API error
    pub fn api<S: Into<String>>(msg: S) -> Self {
        Self::Api(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

// HTTP response conversion
impl BizToneError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::RateLimited(_) => 429,
            Self::Connection(_) => 503,
            Self::Config(_) => 500,
            Self::Api(_) => 500,
            Self::Internal(_) => 500,
            Self::Io(_) => 500,
            Self::Other(_) => 500,
        }
    }

    /// Message safe to show to the caller.
    ///
    /// Only `InvalidInput` passes its own text through; every other variant
    /// collapses to a fixed message so upstream detail stays in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => msg.clone(),
            Self::Config(_) => "서비스 설정 오류가 발생했습니다. 관리자에게 문의하세요.".to_string(),
            Self::RateLimited(_) => "요청이 너무 많습니다. 잠시 후 다시 시도해주세요.".to_string(),
            Self::Connection(_) => "AI 서버와 연결할 수 없습니다. 잠시 후 다시 시도해주세요.".to_string(),
            Self::Api(_) => "변환 중 오류가 발생했습니다. 다시 시도해주세요.".to_string(),
            _ => "알 수 없는 오류가 발생했습니다.".to_string(),
        }
    }
}
