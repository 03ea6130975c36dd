//! Config - 통합 설정 관리
//!
//! - `practice.rs` - PracticeConfig (기본 provider / 난이도 / 모드)

mod practice;

pub use practice::{PracticeConfig, PRACTICE_CONFIG_FILE};
