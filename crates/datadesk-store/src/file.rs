//! JSON-file master-data storage: human-readable, survives restarts.
//!
//! `load` re-reads the file on every call. That keeps a second process (or a
//! hand edit) visible immediately and matches the no-caching rule the rest
//! of the pipeline follows. A missing or unreadable file degrades to the
//! empty default instead of failing the request.

use std::path::PathBuf;

use datadesk_core::error::{DataDeskError, Result};
use datadesk_core::traits::MasterDataStore;
use datadesk_core::types::MasterData;

/// File-backed blob storage.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MasterDataStore for FileStore {
    fn load(&self) -> Result<MasterData> {
        if !self.path.exists() {
            return Ok(MasterData::default());
        }
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!("⚠️ Failed to parse {}: {e}", self.path.display());
                MasterData::default()
            })),
            Err(e) => {
                tracing::warn!("⚠️ Failed to read {}: {e}", self.path.display());
                Ok(MasterData::default())
            }
        }
    }

    fn save(&self, data: &MasterData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| DataDeskError::Storage(format!("Serialize error: {e}")))?;
        std::fs::write(&self.path, &json)?;
        tracing::debug!("💾 Saved master data to {}", self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file ({})", self.path.display())
    }
}
