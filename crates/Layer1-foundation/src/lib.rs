//! # codeforgex-foundation
//!
//! Foundation layer for CodeForgeX:
//! - Error: 공통 에러 타입
//! - Registry: LLM 백엔드 등록 (OpenAI, Gemini)
//! - Storage: JsonStore (JSON 파일 저장소)
//! - Config: 연습 설정 (PracticeConfig)
//!
//! ## 설정 로드 순서
//!
//! ```text
//! ~/.config/codeforgex/*.json   (global)
//!          │
//!          ▼
//! ./.codeforgex/*.json          (project, overrides global)
//!          │
//!          ▼
//! OPENAI_API_KEY / GEMINI_API_KEY (env, fills missing keys)
//! ```

pub mod config;
pub mod error;
pub mod registry;
pub mod storage;

pub use config::{PracticeConfig, PRACTICE_CONFIG_FILE};
pub use error::{Error, Result};
pub use registry::{ProviderConfig, ProviderEntry, ProviderType, ResolvedProvider, PROVIDERS_FILE};
pub use storage::{load_layered, JsonStore};
