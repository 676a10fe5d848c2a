//! # DataDesk Store
//!
//! Persistence for the single master-data blob. Two backends:
//! - **memory**: process-local, lost on restart
//! - **file**: pretty-printed JSON on disk, re-read on every load so an
//!   external edit (or a second process) is always visible
//!
//! Both sit behind [`MasterDataStore`] and are injected into the gateway
//! state; nothing in the system reaches for a global.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use datadesk_core::config::StorageConfig;
use datadesk_core::error::{DataDeskError, Result};
use datadesk_core::traits::MasterDataStore;

/// Build the configured storage backend.
pub fn create_store(config: &StorageConfig) -> Result<Box<dyn MasterDataStore>> {
    match config.backend.as_str() {
        "memory" => Ok(Box::new(MemoryStore::new())),
        "file" => {
            let path = shellexpand::tilde(&config.data_file).to_string();
            Ok(Box::new(FileStore::new(path)))
        }
        other => Err(DataDeskError::Config(format!(
            "Unknown storage backend '{other}' (expected \"memory\" or \"file\")"
        ))),
    }
}
