use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 프로바이더 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Openai,
    Gemini,
}

impl ProviderType {
    /// 지원하는 모든 백엔드
    pub const ALL: [ProviderType; 2] = [ProviderType::Openai, ProviderType::Gemini];

    /// 표시 이름
    pub fn name(&self) -> &'static str {
        match self {
            Self::Openai => "OpenAI",
            Self::Gemini => "Gemini",
        }
    }

    /// 설정 키 (providers.json / --provider)
    pub fn id(&self) -> &'static str {
        match self {
            Self::Openai => "openai",
            Self::Gemini => "gemini",
        }
    }

    /// API 키를 읽을 환경변수
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::Openai => "OPENAI_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }

    /// 기본 Base URL
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Openai => "https://api.openai.com/v1",
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }

    /// 기본 모델
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Openai => "gpt-4o-mini",
            Self::Gemini => "gemini-2.0-flash",
        }
    }

    /// 기본 max_tokens
    pub fn default_max_tokens(&self) -> u32 {
        match self {
            Self::Openai => 4096,
            Self::Gemini => 8192,
        }
    }

    /// 기본 타임아웃 (초)
    pub fn default_timeout(&self) -> u64 {
        120
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ProviderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::Openai),
            "gemini" | "google" => Ok(Self::Gemini),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}

impl Default for ProviderType {
    fn default() -> Self {
        Self::Openai
    }
}
