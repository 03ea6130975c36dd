//! codeforgex-core: Practice model for CodeForgeX
//!
//! Layer2 - LLM 호출 없이 결정적으로 동작하는 연습 로직
//!
//! # 주요 모듈
//!
//! - `request`: 난이도 / 모드 / 생성 요청
//! - `prompt`: 질문 / 설명 / 평가 프롬프트 빌더
//! - `parse`: `[QUESTION]` `[HINT]` `[SOLUTION]` 응답 파서, 평가 응답 파서
//! - `topic`: 파일명 기반 토픽 추론
//! - `session`: 문서별 PracticeSession 과 SessionRegistry
//! - `action`: 다음 동작 계산
//! - `document`: 호스트 문서 추상화 (`Document`, `TextBuffer`)
//! - `mutator`: 중복 검사 후 문서 삽입/치환
//!
//! # 사용 예시
//!
//! ```ignore
//! use codeforgex_core::{parse_response, mutator, TextBuffer, GenerationRequest};
//!
//! let parsed = parse_response(&reply);
//! if let Some(question) = parsed.question.as_deref() {
//!     mutator::insert_question(&mut doc, &request, question)?;
//! }
//! ```

pub mod action;
pub mod document;
pub mod language;
pub mod mutator;
pub mod parse;
pub mod prompt;
pub mod request;
pub mod session;
pub mod topic;

// Re-exports: Request
pub use request::{Difficulty, GenerationRequest, Mode, ParseChoiceError};

// Re-exports: Parsing
pub use parse::{
    parse_evaluation, parse_response, strip_code_fence, EvaluationReport, ParsedResponse, Section,
    Suggestion, EVALUATION_HEADER,
};

// Re-exports: Session
pub use action::{available_actions, Action};
pub use session::{PracticeSession, SessionError, SessionRegistry};

// Re-exports: Document
pub use document::{Document, DocumentError, DocumentId, TextBuffer};
pub use language::CommentStyle;
pub use mutator::MutationError;

// Re-exports: Topic
pub use topic::{detect_topic, GENERAL_TOPIC};
