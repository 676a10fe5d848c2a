//! Provider registry: maps provider names to endpoint configurations.
//!
//! Every supported API is OpenAI-compatible; entries differ only in URL,
//! auth style, and which env vars hold the key.

/// How to attach auth credentials to requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthStyle {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// No authentication required (local servers).
    None,
}

/// Configuration for a single provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider identifier.
    pub name: &'static str,
    /// Base URL for the API.
    pub base_url: &'static str,
    /// Path for chat completions (appended to base_url).
    pub chat_path: &'static str,
    /// Path for listing models, used by health checks (appended to base_url).
    pub models_path: &'static str,
    /// Environment variable names to try for the API key (in order).
    pub env_keys: &'static [&'static str],
    /// How to send auth credentials.
    pub auth_style: AuthStyle,
    /// Environment variable to override the base URL (e.g., OLLAMA_HOST).
    pub base_url_env: Option<&'static str>,
}

/// All known providers.
static PROVIDERS: &[ProviderConfig] = &[
    ProviderConfig {
        name: "openai",
        base_url: "https://api.openai.com/v1",
        chat_path: "/chat/completions",
        models_path: "/models",
        env_keys: &["OPENAI_API_KEY"],
        auth_style: AuthStyle::Bearer,
        base_url_env: Some("OPENAI_API_BASE"),
    },
    ProviderConfig {
        name: "groq",
        base_url: "https://api.groq.com/openai/v1",
        chat_path: "/chat/completions",
        models_path: "/models",
        env_keys: &["GROQ_API_KEY"],
        auth_style: AuthStyle::Bearer,
        base_url_env: None,
    },
    ProviderConfig {
        name: "deepseek",
        base_url: "https://api.deepseek.com",
        chat_path: "/chat/completions",
        models_path: "/models",
        env_keys: &["DEEPSEEK_API_KEY"],
        auth_style: AuthStyle::Bearer,
        base_url_env: None,
    },
    ProviderConfig {
        name: "ollama",
        base_url: "http://localhost:11434/v1",
        chat_path: "/chat/completions",
        models_path: "/models",
        env_keys: &[],
        auth_style: AuthStyle::None,
        base_url_env: Some("OLLAMA_HOST"),
    },
];

/// Look up a provider config by name.
pub fn get_provider_config(name: &str) -> Option<&'static ProviderConfig> {
    PROVIDERS.iter().find(|p| p.name == name)
}

/// List all known provider names.
pub fn all_provider_names() -> Vec<&'static str> {
    PROVIDERS.iter().map(|p| p.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_providers() {
        let openai = get_provider_config("openai").unwrap();
        assert_eq!(openai.base_url, "https://api.openai.com/v1");
        assert_eq!(openai.auth_style, AuthStyle::Bearer);
        assert_eq!(openai.env_keys, ["OPENAI_API_KEY"]);

        let ollama = get_provider_config("ollama").unwrap();
        assert_eq!(ollama.auth_style, AuthStyle::None);
        assert_eq!(ollama.base_url_env, Some("OLLAMA_HOST"));
    }

    #[test]
    fn test_lookup_unknown_provider() {
        assert!(get_provider_config("skynet").is_none());
    }

    #[test]
    fn test_all_provider_names() {
        let names = all_provider_names();
        assert_eq!(names.len(), 4);
        assert!(names.contains(&"openai"));
        assert!(names.contains(&"ollama"));
    }
}
