//! Provider errors
//!
//! 실패한 요청은 재시도하지 않고 그대로 호출자에게 전달된다.
//! 호스트에는 `user_message`로 짧은 알림 문구를 보여준다.

use codeforgex_foundation::Error as FoundationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// 401/403, or a key the backend rejects
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Content filtered: {0}")]
    ContentFiltered(String),

    #[error("Server error: {0}")]
    ServerError(String),

    /// Connection failure or timeout
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Reply body could not be decoded, or had no text
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Unexpected status {status}: {message}")]
    Status { status: u16, message: String },
}

impl ProviderError {
    /// Classify a failed HTTP exchange
    pub fn from_status(status: u16, message: &str) -> Self {
        let message = message.to_string();
        match status {
            401 | 403 => ProviderError::Authentication(message),
            429 if is_quota_message(&message) => ProviderError::QuotaExceeded(message),
            429 => ProviderError::RateLimited(message),
            400 => ProviderError::InvalidRequest(message),
            404 => ProviderError::ModelNotFound(message),
            500..=599 => ProviderError::ServerError(message),
            _ => ProviderError::Status { status, message },
        }
    }

    /// Short notice suitable for showing to the user
    pub fn user_message(&self, provider: &str) -> String {
        match self {
            ProviderError::Authentication(_) => {
                format!("{} API Error: Invalid API key. Please check your credentials.", provider)
            }
            ProviderError::QuotaExceeded(_) | ProviderError::RateLimited(_) => {
                format!("{} API Error: Quota exceeded. Check billing settings.", provider)
            }
            other => format!("{} Error: {}", provider, other),
        }
    }
}

fn is_quota_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("quota") || lower.contains("billing")
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        // URL may carry the Gemini key as a query parameter
        let err = err.without_url();
        if err.is_decode() {
            ProviderError::InvalidResponse(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

impl From<ProviderError> for FoundationError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(msg) => FoundationError::Config(msg),
            ProviderError::ModelNotFound(msg) => FoundationError::ProviderNotFound(msg),
            other => FoundationError::Provider(other.to_string()),
        }
    }
}
