//! # codeforgex-provider
//!
//! LLM backends for CodeForgeX.
//! Every practice action is a single non-streaming completion, so each
//! backend exposes one request/response call.
//!
//! ## Features
//! - OpenAI chat completions
//! - Google Gemini `generateContent`
//! - Gateway selecting the configured default backend

pub mod error;
pub mod gateway;
pub mod providers;
pub mod request;
pub mod r#trait;

pub use gateway::Gateway;
pub use request::{CompletionRequest, Message, Role};
pub use r#trait::{Completion, FinishReason, Provider, ProviderMetadata, TokenUsage};

pub use error::ProviderError;

pub use providers::gemini::GeminiProvider;
pub use providers::openai::OpenAiProvider;
