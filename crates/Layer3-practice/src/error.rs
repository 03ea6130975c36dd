//! Practice errors
//!
//! 모든 실패는 호출자에게 값으로 반환되고, 동시에 Prompter로 알림된다.
//! 전송 실패는 절대 질문 내용으로 문서에 들어가지 않는다.

use crate::prompter::NoticeLevel;
use codeforgex_core::{DocumentError, MutationError, SessionError};
use codeforgex_provider::ProviderError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PracticeError {
    /// 활성 문서 없음
    #[error("No active file detected.")]
    NoActiveDocument,

    /// LLM 전송 실패 (인증, 할당량, 네트워크, 응답 형식)
    #[error("{}", provider_message(.provider, .source))]
    Provider {
        provider: String,
        source: ProviderError,
    },

    /// 중복 삽입 방지
    #[error("{0} is already present in the document.")]
    AlreadyPresent(&'static str),

    /// 선행 상태 없음 (질문/힌트/해답/설명)
    #[error(transparent)]
    MissingPrerequisite(#[from] SessionError),

    /// 응답에 필요한 섹션이 없음
    #[error("The model reply did not contain {0}.")]
    MalformedResponse(&'static str),

    #[error(transparent)]
    Document(#[from] DocumentError),

    /// 사용자가 선택을 취소함
    #[error("Cancelled.")]
    Cancelled,
}

impl PracticeError {
    /// Severity of the notice shown for this error; `None` means stay silent
    pub fn notice_level(&self) -> Option<NoticeLevel> {
        match self {
            PracticeError::Cancelled => None,
            PracticeError::AlreadyPresent(_)
            | PracticeError::MissingPrerequisite(_)
            | PracticeError::MalformedResponse(_) => Some(NoticeLevel::Warning),
            PracticeError::NoActiveDocument
            | PracticeError::Provider { .. }
            | PracticeError::Document(_) => Some(NoticeLevel::Error),
        }
    }
}

fn provider_message(provider: &str, source: &ProviderError) -> String {
    source.user_message(provider)
}

impl From<MutationError> for PracticeError {
    fn from(err: MutationError) -> Self {
        match err {
            MutationError::AlreadyPresent(what) => PracticeError::AlreadyPresent(what),
            MutationError::Document(e) => PracticeError::Document(e),
        }
    }
}
