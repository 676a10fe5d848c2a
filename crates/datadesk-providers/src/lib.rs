//! # DataDesk Providers
//!
//! Chat-completion backends for DataDesk. Everything speaks the OpenAI wire
//! format, so a single `OpenAiCompatibleProvider` covers OpenAI, Groq,
//! DeepSeek, Ollama, and arbitrary `custom:` endpoints.

pub mod openai_compatible;
pub mod registry;

pub use openai_compatible::OpenAiCompatibleProvider;
pub use registry::{AuthStyle, ProviderConfig, all_provider_names, get_provider_config};

use datadesk_core::config::LlmConfig;
use datadesk_core::error::{DataDeskError, Result};
use datadesk_core::traits::Provider;

/// Create a provider from the `[llm]` config section.
pub fn create_provider(llm: &LlmConfig) -> Result<Box<dyn Provider>> {
    match llm.provider.as_str() {
        // Custom endpoint: "custom:https://my-server.com/v1"
        other if other.starts_with("custom:") => Ok(Box::new(
            OpenAiCompatibleProvider::custom(other, llm)?,
        )),

        // All known OpenAI-compatible providers
        name => {
            let registry = registry::get_provider_config(name)
                .ok_or_else(|| DataDeskError::ProviderNotFound(name.into()))?;
            Ok(Box::new(OpenAiCompatibleProvider::from_registry(
                registry, llm,
            )?))
        }
    }
}

/// List all available provider names.
pub fn available_providers() -> Vec<&'static str> {
    let mut names = registry::all_provider_names();
    names.push("custom");
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llm(provider: &str) -> LlmConfig {
        LlmConfig {
            provider: provider.into(),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn test_create_known_provider() {
        let provider = create_provider(&llm("ollama")).unwrap();
        assert_eq!(provider.name(), "ollama");
    }

    #[test]
    fn test_create_custom_provider() {
        let provider = create_provider(&llm("custom:http://localhost:1234/v1")).unwrap();
        assert_eq!(provider.name(), "custom");
    }

    #[test]
    fn test_create_unknown_provider_fails() {
        let err = create_provider(&llm("skynet")).unwrap_err();
        assert!(matches!(err, DataDeskError::ProviderNotFound(_)));
    }

    #[test]
    fn test_available_providers_include_custom() {
        let names = available_providers();
        assert!(names.contains(&"openai"));
        assert!(names.contains(&"custom"));
    }
}
