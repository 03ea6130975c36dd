//! Provider trait - 한 번의 요청, 한 번의 응답

use crate::error::ProviderError;
use crate::request::CompletionRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Token counts reported by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Why generation stopped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    Stop,
    /// Output token limit reached; the text may be cut off
    Length,
    Filtered,
    #[default]
    Other,
}

/// Backend reply
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub usage: TokenUsage,
    pub finish_reason: FinishReason,
    pub model: String,
}

impl Completion {
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: TokenUsage::default(),
            finish_reason: FinishReason::Stop,
            model: model.into(),
        }
    }
}

/// Identity of a configured backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMetadata {
    /// Config key (`openai`, `gemini`)
    pub id: String,

    /// Name used in user-facing error notices
    pub display_name: String,

    pub model: String,
    pub base_url: String,
}

/// LLM backend
#[async_trait]
pub trait Provider: Send + Sync {
    fn metadata(&self) -> &ProviderMetadata;

    /// Send one request; never retried
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ProviderError>;

    /// Send a single instruction and return the reply text
    ///
    /// An empty reply is reported as `InvalidResponse` so callers never
    /// mistake it for content.
    async fn ask(&self, prompt: &str) -> Result<String, ProviderError> {
        let meta = self.metadata();
        tracing::debug!(
            provider = %meta.id,
            model = %meta.model,
            prompt_len = prompt.len(),
            "sending completion request"
        );

        let completion = self.complete(CompletionRequest::prompt(prompt)).await?;

        tracing::debug!(
            provider = %meta.id,
            tokens = completion.usage.total(),
            finish_reason = ?completion.finish_reason,
            "completion received"
        );
        if completion.finish_reason == FinishReason::Length {
            tracing::warn!(provider = %meta.id, "reply hit the output token limit");
        }

        if completion.text.trim().is_empty() {
            return Err(ProviderError::InvalidResponse(
                "completion contained no text".to_string(),
            ));
        }
        Ok(completion.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(ProviderMetadata, &'static str);

    #[async_trait]
    impl Provider for Fixed {
        fn metadata(&self) -> &ProviderMetadata {
            &self.0
        }

        async fn complete(&self, request: CompletionRequest) -> Result<Completion, ProviderError> {
            assert_eq!(request.turns.len(), 1);
            Ok(Completion::new(self.1, "fixed"))
        }
    }

    fn fixed(reply: &'static str) -> Fixed {
        Fixed(
            ProviderMetadata {
                id: "fixed".into(),
                display_name: "Fixed".into(),
                model: "fixed".into(),
                base_url: String::new(),
            },
            reply,
        )
    }

    #[tokio::test]
    async fn test_ask_returns_text() {
        assert_eq!(fixed("[QUESTION] x").ask("go").await.unwrap(), "[QUESTION] x");
    }

    #[tokio::test]
    async fn test_ask_rejects_blank_reply() {
        let err = fixed("  \n").ask("go").await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }
}
