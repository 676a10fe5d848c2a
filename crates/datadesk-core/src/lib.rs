//! # DataDesk Core
//!
//! Shared foundation for the DataDesk backend: configuration, the error
//! type, wire-level data types, and the traits the other crates plug into.
//!
//! Nothing in here does I/O beyond reading/writing the config file. The
//! storage and provider implementations live in their own crates and are
//! injected through the [`traits`] seams.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::{DataDeskConfig, GatewayConfig, IdentityConfig, LlmConfig, StorageConfig};
pub use error::{DataDeskError, Result};
pub use traits::{MasterDataStore, Provider};
pub use types::{GenerateParams, MasterData, Message, ProviderResponse, Role, Usage};
