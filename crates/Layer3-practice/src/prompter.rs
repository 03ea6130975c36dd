//! Prompter - 호스트 UI 추상화 (선택지, 입력, 알림)
//!
//! 모든 선택 메서드는 사용자가 취소하면 `None`을 반환한다.

use async_trait::async_trait;
use codeforgex_core::{Action, Difficulty, Mode};
use std::fmt;

/// Answer to the detected-topic confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicDecision {
    Continue,
    ChangeTopic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        f.write_str(s)
    }
}

/// Transient user-visible message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// Host UI used by the practice commands
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Show the detected topic and ask whether to keep it
    async fn confirm_topic(&self, detected: &str) -> Option<TopicDecision>;

    /// Free-text topic entry
    async fn input_topic(&self) -> Option<String>;

    async fn pick_difficulty(&self) -> Option<Difficulty>;

    async fn pick_mode(&self) -> Option<Mode>;

    /// Pick one of the currently available follow-up actions
    async fn pick_action(&self, actions: &[Action]) -> Option<Action>;

    async fn notify(&self, notice: Notice);
}
