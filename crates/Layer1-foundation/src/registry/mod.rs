//! Registry - OpenAI / Gemini 백엔드 등록

pub mod provider;

pub use provider::{ProviderConfig, ProviderEntry, ProviderType, ResolvedProvider, PROVIDERS_FILE};
