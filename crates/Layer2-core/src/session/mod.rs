//! Session - 문서별 연습 진행 상태
//!
//! - `state` - PracticeSession (질문/힌트/해답/설명 + 진행 플래그)
//! - `registry` - DocumentId → PracticeSession 매핑

mod registry;
mod state;

pub use registry::SessionRegistry;
pub use state::{PracticeSession, SessionError};
