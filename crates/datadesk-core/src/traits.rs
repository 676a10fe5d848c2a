//! Trait seams the gateway plugs implementations into.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{GenerateParams, MasterData, Message, ProviderResponse};

/// A chat-completion backend (OpenAI-compatible API or a local server).
#[async_trait]
pub trait Provider: std::fmt::Debug + Send + Sync {
    /// Provider name, e.g. "openai" or "ollama".
    fn name(&self) -> &str;

    /// Send a conversation and get a completion back.
    async fn chat(&self, messages: &[Message], params: &GenerateParams)
    -> Result<ProviderResponse>;

    /// Cheap liveness probe: key present for cloud providers, reachable
    /// endpoint for local ones.
    async fn health_check(&self) -> Result<bool>;
}

/// Persistence for the master-data blob.
///
/// Implementations use interior mutability so the handle can sit behind an
/// `Arc` in shared state. `load` returns the current revision from the
/// backing store on every call; nothing is cached between requests.
pub trait MasterDataStore: Send + Sync {
    fn load(&self) -> Result<MasterData>;

    fn save(&self, data: &MasterData) -> Result<()>;

    /// Short backend description for startup logging.
    fn describe(&self) -> String;
}
