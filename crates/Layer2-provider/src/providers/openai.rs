//! OpenAI chat completions backend
//!
//! `POST {base}/chat/completions`, bearer auth, non-streaming.

use super::http;
use crate::{
    error::ProviderError,
    r#trait::{Completion, FinishReason, Provider, ProviderMetadata, TokenUsage},
    request::{CompletionRequest, Role},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TEMPERATURE: f32 = 0.6;

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    metadata: ProviderMetadata,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiProvider {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: u32,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: http::client(Duration::from_secs(120))?,
            api_key: api_key.into(),
            metadata: ProviderMetadata {
                id: "openai".to_string(),
                display_name: "OpenAI".to_string(),
                model: model.into(),
                base_url: DEFAULT_BASE_URL.to_string(),
            },
            max_tokens,
            temperature: DEFAULT_TEMPERATURE,
        })
    }

    /// OpenAI-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.metadata.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ProviderError> {
        self.client = http::client(timeout)?;
        Ok(self)
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.metadata.base_url)
    }

    fn chat_body(&self, request: &CompletionRequest) -> ChatBody {
        let system = request.system.iter().map(|text| ChatTurn {
            role: "system".to_string(),
            content: Some(ChatContent::Text(text.clone())),
        });
        let turns = request.turns.iter().map(|m| ChatTurn {
            role: match m.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            }
            .to_string(),
            content: Some(ChatContent::Text(m.content.clone())),
        });

        ChatBody {
            model: self.metadata.model.clone(),
            messages: system.chain(turns).collect(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    fn parse_error(status: StatusCode, body: &str) -> ProviderError {
        let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(body) else {
            return ProviderError::from_status(status.as_u16(), body);
        };

        match error.code.as_deref() {
            Some("invalid_api_key") => ProviderError::Authentication(error.message),
            Some("insufficient_quota") => ProviderError::QuotaExceeded(error.message),
            Some("rate_limit_exceeded") => ProviderError::RateLimited(error.message),
            Some("model_not_found") => ProviderError::ModelNotFound(error.message),
            Some("content_policy_violation") => ProviderError::ContentFiltered(error.message),
            _ => ProviderError::from_status(status.as_u16(), &error.message),
        }
    }

    fn completion(&self, reply: ChatReply) -> Result<Completion, ProviderError> {
        let Some(choice) = reply.choices.into_iter().next() else {
            return Err(ProviderError::InvalidResponse("No choices in response".to_string()));
        };

        let text = match choice.message.content {
            Some(ChatContent::Text(text)) => text,
            Some(ChatContent::Parts(parts)) => parts
                .into_iter()
                .filter_map(|part| match part {
                    ChatPart::Text { text } => Some(text),
                    ChatPart::Other => None,
                })
                .collect(),
            None => String::new(),
        };

        let usage = reply.usage.unwrap_or_default();
        Ok(Completion {
            text,
            usage: TokenUsage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
            },
            finish_reason: finish_reason(choice.finish_reason.as_deref()),
            model: reply.model.unwrap_or_else(|| self.metadata.model.clone()),
        })
    }
}

fn finish_reason(raw: Option<&str>) -> FinishReason {
    match raw {
        Some("stop") => FinishReason::Stop,
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::Filtered,
        _ => FinishReason::Other,
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ProviderError> {
        let builder = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.chat_body(&request));

        let reply: ChatReply = http::send_json("openai", builder, Self::parse_error).await?;
        self.completion(reply)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatBody {
    model: String,
    messages: Vec<ChatTurn>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatTurn {
    role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<ChatContent>,
}

/// Plain string, or a list of typed parts
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum ChatContent {
    Text(String),
    Parts(Vec<ChatPart>),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ChatPart {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatTurn,
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Message;

    fn provider() -> OpenAiProvider {
        OpenAiProvider::new("sk-test", DEFAULT_MODEL, 1024).unwrap()
    }

    #[test]
    fn test_chat_body() {
        let request = CompletionRequest::prompt("hi").with_system("be brief");
        let body = provider().with_temperature(0.3).chat_body(&request);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "be brief");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert!((json["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_chat_body_keeps_turn_order() {
        let request = CompletionRequest {
            system: None,
            turns: vec![Message::user("a"), Message::assistant("b"), Message::user("c")],
        };
        let json = serde_json::to_value(provider().chat_body(&request)).unwrap();
        let roles: Vec<&str> = json["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, vec!["user", "assistant", "user"]);
    }

    #[test]
    fn test_endpoint_with_base_url() {
        let provider = provider().with_base_url("http://localhost:8080/v1/");
        assert_eq!(provider.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_parse_error_codes() {
        let body = r#"{"error":{"message":"Incorrect API key","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        let err = OpenAiProvider::parse_error(StatusCode::UNAUTHORIZED, body);
        assert_eq!(err, ProviderError::Authentication("Incorrect API key".into()));

        let body = r#"{"error":{"message":"over quota","code":"insufficient_quota"}}"#;
        let err = OpenAiProvider::parse_error(StatusCode::TOO_MANY_REQUESTS, body);
        assert!(matches!(err, ProviderError::QuotaExceeded(_)));

        let err = OpenAiProvider::parse_error(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert!(matches!(err, ProviderError::ServerError(_)));
    }

    #[test]
    fn test_completion_from_reply() {
        let body = r#"{
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [{"message": {"role": "assistant", "content": "[QUESTION] Sort it"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 5}
        }"#;
        let reply: ChatReply = serde_json::from_str(body).unwrap();
        let completion = provider().completion(reply).unwrap();

        assert_eq!(completion.text, "[QUESTION] Sort it");
        assert_eq!(completion.finish_reason, FinishReason::Stop);
        assert_eq!(completion.usage.total(), 17);
        assert_eq!(completion.model, "gpt-4o-mini-2024-07-18");
    }

    #[test]
    fn test_completion_from_parts() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": [
            {"type": "text", "text": "[HINT] "}, {"type": "refusal"}, {"type": "text", "text": "Use two pointers"}
        ]}, "finish_reason": "length"}]}"#;
        let reply: ChatReply = serde_json::from_str(body).unwrap();
        let completion = provider().completion(reply).unwrap();

        assert_eq!(completion.text, "[HINT] Use two pointers");
        assert_eq!(completion.finish_reason, FinishReason::Length);
        assert_eq!(completion.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_completion_without_choices() {
        let reply: ChatReply = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let err = provider().completion(reply).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }
}
