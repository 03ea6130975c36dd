//! Storage - 설정 / 세션 JSON 파일

mod json;

pub use json::{load_layered, JsonStore};
