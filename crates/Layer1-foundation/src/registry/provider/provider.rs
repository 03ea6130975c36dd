use crate::storage::{load_layered, JsonStore};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use super::provider_type::ProviderType;

/// 설정 파일명
pub const PROVIDERS_FILE: &str = "providers.json";

/// providers.json 한 항목. 비어 있는 값은 백엔드 기본값을 쓴다.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderEntry {
    #[serde(rename = "type")]
    pub provider_type: ProviderType,

    #[serde(default = "enabled_by_default")]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn enabled_by_default() -> bool {
    true
}

/// Entry with every default filled in and the key checked
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProvider {
    pub provider_type: ProviderType,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl ProviderEntry {
    pub fn new(provider_type: ProviderType) -> Self {
        Self {
            provider_type,
            enabled: true,
            api_key: None,
            base_url: None,
            model: None,
            max_tokens: None,
            timeout_secs: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    fn has_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// 기본값 채우기. 키가 없으면 `MissingCredential`
    pub fn resolve(&self) -> Result<ResolvedProvider> {
        let kind = self.provider_type;
        let api_key = match &self.api_key {
            Some(key) if self.has_key() => key.trim().to_string(),
            _ => return Err(Error::MissingCredential(kind.env_var().to_string())),
        };

        Ok(ResolvedProvider {
            provider_type: kind,
            api_key,
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| kind.default_base_url().to_string()),
            model: self
                .model
                .clone()
                .unwrap_or_else(|| kind.default_model().to_string()),
            max_tokens: self.max_tokens.unwrap_or(kind.default_max_tokens()),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(kind.default_timeout())),
        })
    }
}

/// providers.json 전체
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default)]
    pub providers: BTreeMap<String, ProviderEntry>,
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// global → project → 환경변수 순서로 읽는다
    pub fn load() -> Result<Self> {
        Self::load_from(
            JsonStore::global().ok().as_ref(),
            JsonStore::current_project().ok().as_ref(),
            |name| std::env::var(name).ok(),
        )
    }

    pub fn load_from<F>(
        global: Option<&JsonStore>,
        project: Option<&JsonStore>,
        env: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self =
            load_layered(&[global, project], PROVIDERS_FILE, |acc: &mut Self, layer| acc.merge(layer))?;
        config.fill_keys_from_env(env);
        Ok(config)
    }

    /// 파일에 키가 없는 백엔드만 환경변수로 채운다
    pub fn fill_keys_from_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for kind in ProviderType::ALL {
            let Some(key) = env(kind.env_var()).filter(|k| !k.trim().is_empty()) else {
                continue;
            };
            let entry = self
                .providers
                .entry(kind.id().to_string())
                .or_insert_with(|| ProviderEntry::new(kind));
            if !entry.has_key() {
                entry.api_key = Some(key);
            }
            if self.default.is_none() {
                self.default = Some(kind.id().to_string());
            }
        }
    }

    /// 첫 항목이 기본값이 된다
    pub fn add(&mut self, name: impl Into<String>, entry: ProviderEntry) {
        let name = name.into();
        self.default.get_or_insert_with(|| name.clone());
        self.providers.insert(name, entry);
    }

    pub fn get(&self, name: &str) -> Option<&ProviderEntry> {
        self.providers.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ProviderEntry> {
        self.providers.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    pub fn set_default(&mut self, name: impl Into<String>) {
        self.default = Some(name.into());
    }

    /// `--api-key`로 받은 키
    pub fn set_api_key(&mut self, kind: ProviderType, api_key: &str) {
        let entry = self
            .providers
            .entry(kind.id().to_string())
            .or_insert_with(|| ProviderEntry::new(kind));
        entry.api_key = Some(api_key.to_string());
        self.default.get_or_insert_with(|| kind.id().to_string());
    }

    /// 선택된 백엔드. 항목이 없거나 꺼져 있거나 키가 없으면 에러
    pub fn require(&self, name: &str) -> Result<ResolvedProvider> {
        match self.providers.get(name).filter(|e| e.enabled) {
            Some(entry) => entry.resolve(),
            None => Err(match name.parse::<ProviderType>() {
                Ok(kind) => Error::MissingCredential(kind.env_var().to_string()),
                Err(_) => Error::ProviderNotFound(name.to_string()),
            }),
        }
    }

    /// 켜져 있고 키가 있는 백엔드
    pub fn usable(&self) -> impl Iterator<Item = (&str, ResolvedProvider)> + '_ {
        self.providers
            .iter()
            .filter(|(_, e)| e.enabled)
            .filter_map(|(name, e)| e.resolve().ok().map(|r| (name.as_str(), r)))
    }

    /// `other`가 우선
    pub fn merge(&mut self, other: ProviderConfig) {
        if let Some(default) = other.default {
            self.default = Some(default);
        }
        self.providers.extend(other.providers);
    }
}
