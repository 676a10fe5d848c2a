//! DataDesk configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataDeskConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
}

impl Default for DataDeskConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            gateway: GatewayConfig::default(),
            storage: StorageConfig::default(),
            identity: IdentityConfig::default(),
        }
    }
}

impl DataDeskConfig {
    /// Load config from the default path (~/.datadesk/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::DataDeskError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| crate::error::DataDeskError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::DataDeskError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".datadesk")
            .join("config.toml")
    }

    /// Get the DataDesk home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".datadesk")
    }
}

/// LLM provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    /// Custom base URL. Empty = registry default for the provider.
    #[serde(default)]
    pub endpoint: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_provider() -> String { "openai".into() }
fn default_model() -> String { "gpt-4o-mini".into() }
fn default_temperature() -> f32 { 0.7 }
fn default_max_tokens() -> u32 { 500 }
fn default_request_timeout() -> u64 { 30 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: String::new(),
            endpoint: String::new(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 3000 }

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Master-data storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// "memory" (lost on restart) or "file" (JSON on disk).
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

fn default_storage_backend() -> String { "memory".into() }
fn default_data_file() -> String { "~/.datadesk/master-data.json".into() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            data_file: default_data_file(),
        }
    }
}

/// Assistant identity: the name and the system prompt template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_identity_name")]
    pub name: String,
    /// Template for the system prompt. `{context}` is replaced with the
    /// retrieved master-data context on every chat request.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_identity_name() -> String { "DataDesk".into() }
fn default_system_prompt() -> String {
    "You are the DataDesk assistant. Use the following reference data to answer questions:\n\n\
     {context}\n\n\
     Answer from the reference data where it applies. If the data does not cover the \
     question, say so instead of guessing."
        .into()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            name: default_identity_name(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl IdentityConfig {
    /// Render the system prompt with the retrieved context substituted in.
    ///
    /// A template without the `{context}` placeholder gets the context
    /// appended after a blank line so a template mistake never drops data.
    pub fn render_system_prompt(&self, context: &str) -> String {
        if self.system_prompt.contains("{context}") {
            self.system_prompt.replace("{context}", context)
        } else {
            format!("{}\n\n{}", self.system_prompt, context)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DataDeskConfig::default();
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert!((config.llm.temperature - 0.7).abs() < 0.01);
        assert_eq!(config.llm.max_tokens, 500);
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.identity.name, "DataDesk");
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [llm]
            provider = "ollama"
            model = "llama3.2"
            temperature = 0.5

            [storage]
            backend = "file"
            data_file = "/tmp/master-data.json"

            [identity]
            name = "DeskBot"
            system_prompt = "Answer using: {context}"
        "#;

        let config: DataDeskConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.llm.model, "llama3.2");
        assert_eq!(config.storage.backend, "file");
        assert_eq!(config.identity.name, "DeskBot");
        // Untouched sections keep their defaults.
        assert_eq!(config.gateway.port, 3000);
        assert_eq!(config.llm.max_tokens, 500);
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let toml_str = "";
        let config: DataDeskConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.gateway.port, 3000);
        assert_eq!(config.storage.backend, "memory");
    }

    #[test]
    fn test_home_dir() {
        let home = DataDeskConfig::home_dir();
        assert!(home.to_string_lossy().contains("datadesk"));
    }

    #[test]
    fn test_render_system_prompt_substitutes_context() {
        let identity = IdentityConfig {
            name: "DataDesk".into(),
            system_prompt: "Reference:\n{context}\nBe brief.".into(),
        };
        let rendered = identity.render_system_prompt("warehouse opens at 8");
        assert_eq!(rendered, "Reference:\nwarehouse opens at 8\nBe brief.");
    }

    #[test]
    fn test_render_system_prompt_without_placeholder_appends() {
        let identity = IdentityConfig {
            name: "DataDesk".into(),
            system_prompt: "You answer questions.".into(),
        };
        let rendered = identity.render_system_prompt("warehouse opens at 8");
        assert_eq!(rendered, "You answer questions.\n\nwarehouse opens at 8");
    }
}
