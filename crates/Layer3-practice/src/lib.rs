//! # codeforgex-practice
//!
//! 연습 명령 오케스트레이션 레이어.
//!
//! 호스트(편집기 / CLI)는 세 가지를 제공한다:
//!
//! - `Document` - 현재 열린 문서 (codeforgex-core)
//! - `Prompter` - 선택지/입력/알림 UI
//! - `Provider` - LLM 백엔드 (codeforgex-provider)
//!
//! ## 사용 예
//!
//! ```ignore
//! use codeforgex_practice::{Command, PracticeCommands};
//! use codeforgex_core::SessionRegistry;
//!
//! let commands = PracticeCommands::new(provider, prompter);
//! let mut sessions = SessionRegistry::new();
//!
//! commands
//!     .execute(Command::StartPractice, Some(&mut doc), &mut sessions)
//!     .await?;
//! ```

pub mod command;
pub mod error;
pub mod orchestrator;
pub mod prompter;

pub use command::{Command, Outcome};
pub use error::PracticeError;
pub use orchestrator::{PracticeCommands, PracticeDefaults};
pub use prompter::{Notice, NoticeLevel, Prompter, TopicDecision};
