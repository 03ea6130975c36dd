//! LLM Gateway - builds the configured backends and hands out the selected one
//!
//! 요청은 재시도하지 않고 다른 백엔드로 넘기지도 않는다.

use crate::{
    providers::{gemini::GeminiProvider, openai::OpenAiProvider},
    Provider,
};
use codeforgex_foundation::{Error, ProviderConfig, ProviderType, ResolvedProvider, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct Gateway {
    providers: BTreeMap<String, Arc<dyn Provider>>,
    default: String,
}

impl Gateway {
    /// Build every usable backend; the default one must have a credential
    ///
    /// A missing key for the default backend is `Error::MissingCredential`.
    /// Other enabled backends without a key are skipped.
    pub fn from_config(config: &ProviderConfig, temperature: f32) -> Result<Self> {
        let default = config
            .default
            .clone()
            .unwrap_or_else(|| ProviderType::default().id().to_string());

        let mut providers = BTreeMap::new();
        providers.insert(
            default.clone(),
            build_provider(&config.require(&default)?, temperature)?,
        );
        for (name, resolved) in config.usable() {
            if !providers.contains_key(name) {
                providers.insert(name.to_string(), build_provider(&resolved, temperature)?);
            }
        }

        Ok(Self { providers, default })
    }

    pub fn default_name(&self) -> &str {
        &self.default
    }

    pub fn default_provider(&self) -> Result<Arc<dyn Provider>> {
        self.get(&self.default)
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Provider>> {
        self.providers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::ProviderNotFound(name.to_string()))
    }

    /// Sorted backend names
    pub fn names(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }
}

fn build_provider(resolved: &ResolvedProvider, temperature: f32) -> Result<Arc<dyn Provider>> {
    let ResolvedProvider {
        provider_type,
        api_key,
        base_url,
        model,
        max_tokens,
        timeout,
    } = resolved.clone();

    let provider: Arc<dyn Provider> = match provider_type {
        ProviderType::Openai => Arc::new(
            OpenAiProvider::new(api_key, model, max_tokens)?
                .with_base_url(base_url)
                .with_temperature(temperature)
                .with_timeout(timeout)?,
        ),
        ProviderType::Gemini => Arc::new(
            GeminiProvider::new(api_key, model, max_tokens)?
                .with_base_url(base_url)
                .with_temperature(temperature)
                .with_timeout(timeout)?,
        ),
    };

    tracing::debug!(
        provider = %provider_type,
        model = %provider.metadata().model,
        "provider ready"
    );
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeforgex_foundation::ProviderEntry;

    fn config(entries: Vec<(&str, ProviderEntry)>, default: &str) -> ProviderConfig {
        let mut config = ProviderConfig::new();
        for (name, entry) in entries {
            config.add(name, entry);
        }
        config.set_default(default);
        config
    }

    #[test]
    fn test_builds_default_and_keyed_backends() {
        let config = config(
            vec![
                ("openai", ProviderEntry::new(ProviderType::Openai).with_key("sk-a")),
                ("gemini", ProviderEntry::new(ProviderType::Gemini).with_key("g-b")),
            ],
            "gemini",
        );

        let gateway = Gateway::from_config(&config, 0.6).unwrap();
        assert_eq!(gateway.names(), vec!["gemini", "openai"]);
        assert_eq!(gateway.default_name(), "gemini");

        let provider = gateway.default_provider().unwrap();
        assert_eq!(provider.metadata().id, "gemini");
        assert_eq!(provider.metadata().model, "gemini-2.0-flash");
    }

    #[test]
    fn test_missing_default_credential_is_fatal() {
        let config = config(
            vec![("openai", ProviderEntry::new(ProviderType::Openai))],
            "openai",
        );

        let err = Gateway::from_config(&config, 0.6).err().unwrap();
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "Missing credential: OPENAI_API_KEY is not set");
    }

    #[test]
    fn test_empty_config_requires_openai_key() {
        let err = Gateway::from_config(&ProviderConfig::new(), 0.6).err().unwrap();
        assert!(matches!(err, Error::MissingCredential(ref v) if v == "OPENAI_API_KEY"));
    }

    #[test]
    fn test_skips_secondary_without_key() {
        let config = config(
            vec![
                ("openai", ProviderEntry::new(ProviderType::Openai).with_key("sk-a")),
                ("gemini", ProviderEntry::new(ProviderType::Gemini)),
            ],
            "openai",
        );

        let gateway = Gateway::from_config(&config, 0.6).unwrap();
        assert_eq!(gateway.names(), vec!["openai"]);
        assert!(matches!(gateway.get("gemini"), Err(Error::ProviderNotFound(_))));
    }

    #[test]
    fn test_model_override_reaches_backend() {
        let config = config(
            vec![(
                "openai",
                ProviderEntry::new(ProviderType::Openai)
                    .with_key("sk-a")
                    .with_model("gpt-4.1-mini")
                    .with_base_url("http://localhost:1234/v1"),
            )],
            "openai",
        );

        let provider = Gateway::from_config(&config, 0.2)
            .unwrap()
            .default_provider()
            .unwrap();
        assert_eq!(provider.metadata().model, "gpt-4.1-mini");
        assert_eq!(provider.metadata().base_url, "http://localhost:1234/v1");
    }
}
