//! Shared data types: chat messages, provider I/O, and the master-data blob.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;

/// Chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message, in the OpenAI wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Generation parameters passed to a provider on every chat call.
#[derive(Debug, Clone)]
pub struct GenerateParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerateParams {
    /// Build params from the configured LLM section.
    pub fn from_llm_config(llm: &LlmConfig) -> Self {
        Self {
            model: llm.model.clone(),
            temperature: llm.temperature,
            max_tokens: llm.max_tokens,
        }
    }
}

/// Token accounting reported by the provider, when available.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// What a provider returns from a chat completion.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Assistant text. `None` when the API returned a choice without content.
    pub content: Option<String>,
    pub finish_reason: Option<String>,
    pub usage: Option<Usage>,
}

/// The master-data blob: one shared reference text plus update metadata.
///
/// Wire form is camelCase (`content` / `lastUpdated` / `updatedBy`). The
/// retrieval core only ever sees `content` as a plain string snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterData {
    pub content: String,
    pub last_updated: Option<DateTime<Utc>>,
    pub updated_by: String,
}

impl Default for MasterData {
    fn default() -> Self {
        Self {
            content: String::new(),
            last_updated: None,
            updated_by: String::new(),
        }
    }
}

impl MasterData {
    /// A fresh revision of the blob, stamped now.
    pub fn new_revision(content: impl Into<String>, updated_by: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            last_updated: Some(Utc::now()),
            updated_by: updated_by.into(),
        }
    }
}
