//! Unified OpenAI-compatible provider.
//!
//! A single struct that handles chat completions for every supported API.
//! Providers are distinguished only by endpoint URL, auth style, and API key.
//! The outbound call carries the configured request timeout and retries once
//! on transport errors; HTTP error statuses fail immediately.

use std::time::Duration;

use async_trait::async_trait;
use datadesk_core::config::LlmConfig;
use datadesk_core::error::{DataDeskError, Result};
use datadesk_core::traits::Provider;
use datadesk_core::types::{GenerateParams, Message, ProviderResponse, Usage};
use serde_json::{Value, json};

use crate::registry::{AuthStyle, ProviderConfig};

/// A unified provider that works with any OpenAI-compatible API.
#[derive(Debug)]
pub struct OpenAiCompatibleProvider {
    /// Provider name (e.g., "openai", "groq", "ollama").
    name: String,
    /// API key for authentication.
    api_key: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    base_url: String,
    /// Path for chat completions (appended to base_url).
    chat_path: String,
    /// Path for listing models, used by health checks.
    models_path: String,
    /// Authentication style.
    auth_style: AuthStyle,
    /// HTTP client, carries the configured request timeout.
    client: reqwest::Client,
}

impl OpenAiCompatibleProvider {
    /// Create from a known provider config + the `[llm]` config section.
    ///
    /// Resolution order:
    /// - API key: `llm.api_key` > env vars > empty
    /// - Base URL: `llm.endpoint` > env override > registry default
    pub fn from_registry(registry: &ProviderConfig, llm: &LlmConfig) -> Result<Self> {
        let api_key = if !llm.api_key.is_empty() {
            llm.api_key.clone()
        } else {
            registry
                .env_keys
                .iter()
                .find_map(|key| std::env::var(key).ok())
                .unwrap_or_default()
        };

        let base_url = if !llm.endpoint.is_empty() {
            llm.endpoint.trim_end_matches('/').to_string()
        } else {
            registry
                .base_url_env
                .and_then(|env_key| {
                    let val = std::env::var(env_key).ok()?;
                    // OLLAMA_HOST style values usually lack the /v1 suffix.
                    if val.ends_with("/v1") {
                        Some(val)
                    } else {
                        Some(format!("{}/v1", val.trim_end_matches('/')))
                    }
                })
                .unwrap_or_else(|| registry.base_url.to_string())
        };

        Ok(Self {
            name: registry.name.to_string(),
            api_key,
            base_url,
            chat_path: registry.chat_path.to_string(),
            models_path: registry.models_path.to_string(),
            auth_style: registry.auth_style,
            client: build_client(llm)?,
        })
    }

    /// Create for a custom endpoint (e.g., "custom:https://my-server.com/v1").
    pub fn custom(endpoint: &str, llm: &LlmConfig) -> Result<Self> {
        let base_url = endpoint
            .strip_prefix("custom:")
            .unwrap_or(endpoint)
            .trim_end_matches('/')
            .to_string();

        let api_key = if !llm.api_key.is_empty() {
            llm.api_key.clone()
        } else {
            std::env::var("CUSTOM_API_KEY").unwrap_or_default()
        };

        let auth_style = if api_key.is_empty() {
            AuthStyle::None
        } else {
            AuthStyle::Bearer
        };

        Ok(Self {
            name: "custom".to_string(),
            api_key,
            base_url,
            chat_path: "/chat/completions".to_string(),
            models_path: "/models".to_string(),
            auth_style,
            client: build_client(llm)?,
        })
    }

    /// Build the auth header for the request.
    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth_style {
            AuthStyle::Bearer if !self.api_key.is_empty() => {
                req.header("Authorization", format!("Bearer {}", self.api_key))
            }
            _ => req,
        }
    }

    fn post_chat(&self, url: &str, body: &Value) -> reqwest::RequestBuilder {
        let req = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body);
        self.apply_auth(req)
    }
}

fn build_client(llm: &LlmConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(llm.request_timeout_secs))
        .build()
        .map_err(|e| DataDeskError::Http(format!("Failed to build HTTP client: {e}")))
}

#[async_trait]
impl Provider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn chat(
        &self,
        messages: &[Message],
        params: &GenerateParams,
    ) -> Result<ProviderResponse> {
        // For providers that require auth, check the key before any I/O.
        if self.auth_style != AuthStyle::None && self.api_key.is_empty() {
            return Err(DataDeskError::ApiKeyMissing(self.name.clone()));
        }

        let body = json!({
            "model": params.model,
            "messages": serde_json::to_value(messages).unwrap_or_default(),
            "temperature": params.temperature,
            "max_tokens": params.max_tokens,
        });

        let url = format!("{}{}", self.base_url, self.chat_path);

        // One retry on transport failure (connect/timeout), then give up.
        // Error statuses are not retried.
        let resp = match self.post_chat(&url, &body).send().await {
            Ok(resp) => resp,
            Err(e) if e.is_connect() || e.is_timeout() => {
                tracing::warn!("⚠️ {} transport error, retrying once: {e}", self.name);
                self.post_chat(&url, &body).send().await.map_err(|e| {
                    DataDeskError::Http(format!(
                        "{} connection failed ({}): {}",
                        self.name, url, e
                    ))
                })?
            }
            Err(e) => {
                return Err(DataDeskError::Http(format!(
                    "{} connection failed ({}): {}",
                    self.name, url, e
                )));
            }
        };

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(DataDeskError::Provider(format!(
                "{} API error {}: {}",
                self.name, status, text
            )));
        }

        // Parse response (standard OpenAI format).
        let json: Value = resp
            .json()
            .await
            .map_err(|e| DataDeskError::Http(e.to_string()))?;

        let choice = json["choices"]
            .get(0)
            .ok_or_else(|| DataDeskError::Provider("No choices in response".into()))?;

        let content = choice["message"]["content"].as_str().map(String::from);

        let usage = json["usage"].as_object().map(|u| Usage {
            prompt_tokens: u.get("prompt_tokens").and_then(|v| v.as_u64()).unwrap_or(0) as u32,
            completion_tokens: u
                .get("completion_tokens")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32,
            total_tokens: u.get("total_tokens").and_then(|v| v.as_u64()).unwrap_or(0) as u32,
        });

        Ok(ProviderResponse {
            content,
            finish_reason: choice["finish_reason"].as_str().map(String::from),
            usage,
        })
    }

    async fn health_check(&self) -> Result<bool> {
        if self.auth_style != AuthStyle::None {
            // For cloud providers, just check if the API key is set.
            return Ok(!self.api_key.is_empty());
        }

        // For local servers (ollama), try to connect.
        let url = format!("{}{}", self.base_url, self.models_path);
        let resp = self.client.get(&url).send().await;
        Ok(resp.is_ok())
    }
}
