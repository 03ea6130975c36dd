//! Practice Config - 연습 세션 기본값 (`config.json`)

use crate::storage::{load_layered, JsonStore};
use crate::Result;
use serde::{Deserialize, Serialize};

pub const PRACTICE_CONFIG_FILE: &str = "config.json";

const DEFAULT_TEMPERATURE: f32 = 0.6;

/// 난이도/모드는 문자열 그대로 두고 core 레이어에서 파싱한다
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PracticeConfig {
    /// openai / gemini
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,

    /// 파일에 없으면 `None`이라 병합 시 덮어쓰지 않는다
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_difficulty: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_mode: Option<String>,
}

impl PracticeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// global → project
    pub fn load() -> Result<Self> {
        Self::load_from(
            JsonStore::global().ok().as_ref(),
            JsonStore::current_project().ok().as_ref(),
        )
    }

    pub fn load_from(global: Option<&JsonStore>, project: Option<&JsonStore>) -> Result<Self> {
        load_layered(&[global, project], PRACTICE_CONFIG_FILE, Self::merge)
    }

    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn set_temperature(&mut self, temperature: f32) {
        self.temperature = Some(temperature);
    }

    /// 값이 있는 필드만 덮어쓴다
    pub fn merge(&mut self, other: PracticeConfig) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }
        take(&mut self.default_provider, other.default_provider);
        take(&mut self.default_model, other.default_model);
        take(&mut self.temperature, other.temperature);
        take(&mut self.default_difficulty, other.default_difficulty);
        take(&mut self.default_mode, other.default_mode);
    }
}
