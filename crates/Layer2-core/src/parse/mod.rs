//! Parsing of LLM replies
//!
//! - `response` - `[QUESTION]` / `[HINT]` / `[SOLUTION]` 마커 분리
//! - `evaluation` - 평가 요약과 `LINE <n>:` 제안 분리
//!
//! 두 파서 모두 실패하지 않는다. 형식이 어긋난 응답은 "섹션 없음"으로 처리된다.

mod evaluation;
mod response;

pub use evaluation::{parse_evaluation, EvaluationReport, Suggestion, EVALUATION_HEADER};
pub use response::{parse_response, strip_code_fence, ParsedResponse, Section};
