use async_trait::async_trait;

#[derive(Debug)]
pub enum GenerativeModelError {
    NotConfigured(String),
    NetworkError(String),
    ApiError { status: u16, message: String },
    RateLimitExceeded,
    InvalidResponse(String),
}

impl std::fmt::Display for GenerativeModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerativeModelError::NotConfigured(msg) => write!(f, "Not configured: {}", msg),
            GenerativeModelError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            GenerativeModelError::ApiError { status, message } => {
                write!(f, "API error ({}): {}", status, message)
            }
            GenerativeModelError::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            GenerativeModelError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for GenerativeModelError {}

impl GenerativeModelError {
    /// Whether a retry has a chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            GenerativeModelError::NetworkError(_) | GenerativeModelError::RateLimitExceeded => true,
            GenerativeModelError::ApiError { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// External multimodal model that answers a text prompt about a file.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Returns the raw text of the model's answer.
    async fn generate(
        &self,
        prompt: &str,
        data: &[u8],
        mime_type: &str,
    ) -> Result<String, GenerativeModelError>;

    fn model_name(&self) -> &str;
}
