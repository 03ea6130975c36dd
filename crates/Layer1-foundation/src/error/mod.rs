//! Error types for CodeForgeX
//!
//! 설정/저장소/백엔드 구성 단계의 에러. 연습 명령 실행 중 에러는
//! `codeforgex_practice::PracticeError`가 담당한다.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 설정
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    /// 기본 백엔드의 API 키 없음 - 시작 시 치명적
    #[error("Missing credential: {0} is not set")]
    MissingCredential(String),

    // ========================================================================
    // 저장소
    // ========================================================================
    #[error("Storage error: {0}")]
    Storage(String),

    // ========================================================================
    // Provider
    // ========================================================================
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Errors that stop the process before any command runs
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::MissingCredential(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_is_fatal() {
        let err = Error::MissingCredential("OPENAI_API_KEY".to_string());
        assert!(err.is_fatal());
        assert_eq!(
            err.to_string(),
            "Missing credential: OPENAI_API_KEY is not set"
        );
    }

    #[test]
    fn test_other_errors_are_not_fatal() {
        assert!(!Error::ProviderNotFound("ollama".into()).is_fatal());
        assert!(!Error::Config("bad".into()).is_fatal());
    }

    #[test]
    fn test_json_error_converts() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
