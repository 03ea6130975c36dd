//! Provider selection from config files and command-line flags
//!
//! 우선순위: CLI 플래그 > config.json (defaultProvider/defaultModel) > providers.json

use anyhow::{bail, Result};
use codeforgex_foundation::{PracticeConfig, ProviderConfig, ProviderEntry, ProviderType};

/// Provider flags given on the command line
#[derive(Debug, Clone, Default)]
pub struct ProviderFlags {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
}

/// Apply practice defaults and flags to the loaded provider config
///
/// Returns the name of the backend that will be used.
pub fn select_provider(
    config: &mut ProviderConfig,
    practice: &PracticeConfig,
    flags: &ProviderFlags,
) -> Result<String> {
    let name = flags
        .provider
        .clone()
        .or_else(|| practice.default_provider.clone())
        .or_else(|| config.default.clone())
        .unwrap_or_else(|| ProviderType::default().id().to_string());

    let provider_type = match config.get(&name) {
        Some(entry) => entry.provider_type,
        None => match name.parse::<ProviderType>() {
            Ok(t) => t,
            Err(e) => bail!("{} (expected one of: openai, gemini)", e),
        },
    };

    if !config.contains(&name) {
        config.add(name.clone(), ProviderEntry::new(provider_type));
    }
    config.set_default(name.clone());

    let model = flags.model.clone().or_else(|| practice.default_model.clone());
    if let Some(entry) = config.get_mut(&name) {
        if let Some(model) = model {
            entry.model = Some(model);
        }
        if let Some(api_key) = &flags.api_key {
            entry.api_key = Some(api_key.clone());
        }
    }

    tracing::info!(provider = %name, "using provider");
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_openai() {
        let mut config = ProviderConfig::new();
        let name = select_provider(&mut config, &PracticeConfig::new(), &ProviderFlags::default())
            .unwrap();

        assert_eq!(name, "openai");
        assert_eq!(config.default.as_deref(), Some("openai"));
        assert!(config.require("openai").is_err(), "no key yet");
    }

    #[test]
    fn test_flags_override_practice_config() {
        let mut config = ProviderConfig::new();
        config.set_api_key(ProviderType::Openai, "sk-openai");

        let mut practice = PracticeConfig::new();
        practice.default_provider = Some("openai".into());

        let flags = ProviderFlags {
            provider: Some("gemini".into()),
            model: None,
            api_key: Some("g-key".into()),
        };
        let name = select_provider(&mut config, &practice, &flags).unwrap();

        assert_eq!(name, "gemini");
        let resolved = config.require("gemini").unwrap();
        assert_eq!(resolved.provider_type, ProviderType::Gemini);
        assert_eq!(resolved.api_key, "g-key");
        assert_eq!(resolved.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_practice_model_applies_to_default() {
        let mut config = ProviderConfig::new();
        config.set_api_key(ProviderType::Openai, "sk-openai");

        let mut practice = PracticeConfig::new();
        practice.default_model = Some("gpt-4.1-mini".into());

        select_provider(&mut config, &practice, &ProviderFlags::default()).unwrap();
        assert_eq!(config.require("openai").unwrap().model, "gpt-4.1-mini");
    }

    #[test]
    fn test_unknown_provider() {
        let mut config = ProviderConfig::new();
        let flags = ProviderFlags {
            provider: Some("ollama".into()),
            ..Default::default()
        };
        let err = select_provider(&mut config, &PracticeConfig::new(), &flags).unwrap_err();
        assert!(err.to_string().contains("ollama"));
    }
}
