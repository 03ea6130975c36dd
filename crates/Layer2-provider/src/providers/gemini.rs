//! Google Gemini backend (`generateContent`)

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

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TEMPERATURE: f32 = 0.6;

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    metadata: ProviderMetadata,
    max_tokens: u32,
    temperature: f32,
}

impl GeminiProvider {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: u32,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: http::client(Duration::from_secs(120))?,
            api_key: api_key.into(),
            metadata: ProviderMetadata {
                id: "gemini".to_string(),
                display_name: "Gemini".to_string(),
                model: model.into(),
                base_url: DEFAULT_BASE_URL.to_string(),
            },
            max_tokens,
            temperature: DEFAULT_TEMPERATURE,
        })
    }

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

    /// 키는 쿼리 파라미터로 전달된다 (로그에 URL 남기지 말 것)
    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.metadata.base_url, self.metadata.model, self.api_key
        )
    }

    fn generate_body(&self, request: &CompletionRequest) -> GenerateBody {
        let contents = request
            .turns
            .iter()
            .map(|m| Content {
                role: Some(
                    match m.role {
                        Role::User => "user",
                        Role::Assistant => "model",
                    }
                    .to_string(),
                ),
                parts: vec![Part::text(&m.content)],
            })
            .collect();

        GenerateBody {
            contents,
            system_instruction: request.system.as_deref().map(|text| Content {
                role: None,
                parts: vec![Part::text(text)],
            }),
            generation_config: GenerationConfig {
                max_output_tokens: self.max_tokens,
                temperature: self.temperature,
            },
        }
    }

    fn parse_error(status: StatusCode, body: &str) -> ProviderError {
        let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(body) else {
            return ProviderError::from_status(status.as_u16(), body);
        };

        match error.status.as_deref() {
            Some("RESOURCE_EXHAUSTED") => ProviderError::QuotaExceeded(error.message),
            Some("INVALID_ARGUMENT") if error.message.contains("API key") => {
                ProviderError::Authentication(error.message)
            }
            Some("PERMISSION_DENIED") | Some("UNAUTHENTICATED") => {
                ProviderError::Authentication(error.message)
            }
            Some("NOT_FOUND") => ProviderError::ModelNotFound(error.message),
            _ => ProviderError::from_status(status.as_u16(), &error.message),
        }
    }

    fn completion(&self, reply: GenerateReply) -> Result<Completion, ProviderError> {
        let Some(candidate) = reply.candidates.into_iter().next() else {
            // 프롬프트 자체가 차단되면 후보가 비어 있다
            if let Some(reason) = reply.prompt_feedback.and_then(|f| f.block_reason) {
                return Err(ProviderError::ContentFiltered(reason));
            }
            return Err(ProviderError::InvalidResponse("No candidates in response".to_string()));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        let finish_reason = match candidate.finish_reason.as_deref() {
            Some("STOP") => FinishReason::Stop,
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") | Some("RECITATION") | Some("BLOCKLIST") => FinishReason::Filtered,
            _ => FinishReason::Other,
        };
        if finish_reason == FinishReason::Filtered && text.is_empty() {
            return Err(ProviderError::ContentFiltered(
                candidate.finish_reason.unwrap_or_default(),
            ));
        }

        let usage = reply.usage_metadata.unwrap_or_default();
        Ok(Completion {
            text,
            usage: TokenUsage {
                input_tokens: usage.prompt_token_count,
                output_tokens: usage.candidates_token_count,
            },
            finish_reason,
            model: reply
                .model_version
                .unwrap_or_else(|| self.metadata.model.clone()),
        })
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ProviderError> {
        let builder = self
            .client
            .post(self.generate_url())
            .json(&self.generate_body(&request));

        let reply: GenerateReply = http::send_json("gemini", builder, Self::parse_error).await?;
        self.completion(reply)
    }
}

// ============================================================================
// Wire types (camelCase)
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBody {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateReply {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Message;

    fn provider() -> GeminiProvider {
        GeminiProvider::new("g-key", DEFAULT_MODEL, 2048).unwrap()
    }

    #[test]
    fn test_generate_url() {
        let url = provider().with_base_url("http://localhost:9000/v1beta/").generate_url();
        assert_eq!(
            url,
            "http://localhost:9000/v1beta/models/gemini-2.0-flash:generateContent?key=g-key"
        );
    }

    #[test]
    fn test_generate_body() {
        let request = CompletionRequest {
            system: Some("be brief".into()),
            turns: vec![Message::user("q"), Message::assistant("a")],
        };
        let json = serde_json::to_value(provider().generate_body(&request)).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "q");
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert!(json["systemInstruction"].get("role").is_none());
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2048);
    }

    #[test]
    fn test_generate_body_without_system() {
        let json =
            serde_json::to_value(provider().generate_body(&CompletionRequest::prompt("q"))).unwrap();
        assert!(json.get("systemInstruction").is_none());
    }

    #[test]
    fn test_parse_error_status() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        let err = GeminiProvider::parse_error(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, ProviderError::Authentication(_)));

        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = GeminiProvider::parse_error(StatusCode::TOO_MANY_REQUESTS, body);
        assert!(matches!(err, ProviderError::QuotaExceeded(_)));

        let body = r#"{"error":{"code":400,"message":"bad field","status":"INVALID_ARGUMENT"}}"#;
        let err = GeminiProvider::parse_error(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, ProviderError::InvalidRequest(_)));
    }

    #[test]
    fn test_completion_joins_parts() {
        let body = r#"{
            "candidates": [{"content": {"role": "model", "parts": [{"text": "[SOLUTION]\n"}, {"text": "def f(): pass"}]}, "finishReason": "STOP"}],
            "usageMetadata": {"promptTokenCount": 20, "candidatesTokenCount": 8, "totalTokenCount": 28},
            "modelVersion": "gemini-2.0-flash-001"
        }"#;
        let reply: GenerateReply = serde_json::from_str(body).unwrap();
        let completion = provider().completion(reply).unwrap();

        assert_eq!(completion.text, "[SOLUTION]\ndef f(): pass");
        assert_eq!(completion.usage.total(), 28);
        assert_eq!(completion.model, "gemini-2.0-flash-001");
    }

    #[test]
    fn test_safety_stop_without_text() {
        let body = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let reply: GenerateReply = serde_json::from_str(body).unwrap();
        let err = provider().completion(reply).unwrap_err();
        assert_eq!(err, ProviderError::ContentFiltered("SAFETY".into()));
    }

    #[test]
    fn test_blocked_prompt() {
        let body = r#"{"promptFeedback": {"blockReason": "OTHER"}}"#;
        let reply: GenerateReply = serde_json::from_str(body).unwrap();
        let err = provider().completion(reply).unwrap_err();
        assert!(matches!(err, ProviderError::ContentFiltered(_)));
    }
}
