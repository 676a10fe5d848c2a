//! In-memory master-data storage: simple, shared across requests, gone on
//! restart. The default backend.

use std::sync::RwLock;

use datadesk_core::error::{DataDeskError, Result};
use datadesk_core::traits::MasterDataStore;
use datadesk_core::types::MasterData;

/// Process-local blob storage behind an `RwLock`.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MasterData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MasterDataStore for MemoryStore {
    fn load(&self) -> Result<MasterData> {
        let guard = self
            .inner
            .read()
            .map_err(|_| DataDeskError::Storage("master data lock poisoned".into()))?;
        Ok(guard.clone())
    }

    fn save(&self, data: &MasterData) -> Result<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| DataDeskError::Storage("master data lock poisoned".into()))?;
        *guard = data.clone();
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory (volatile)".to_string()
    }
}
