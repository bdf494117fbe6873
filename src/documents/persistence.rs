//! Disk persistence for the document store
//!
//! Serializes the whole corpus to a single JSON file under the data
//! directory. Loaded once at startup, written after every mutation.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::documents::store::DocumentStore;

/// File name of the corpus inside the data directory
const STORE_FILE: &str = "documents.json";

/// Persistence manager for the document store
pub struct StorePersistence {
    data_dir: PathBuf,
}

impl StorePersistence {
    /// Create a persistence manager, ensuring the data directory exists
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir)
                .context("Failed to create data directory")?;
        }

        Ok(Self { data_dir })
    }

    /// Path of the corpus file
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    /// Load the store from disk, or an empty store if none exists yet
    pub fn load(&self) -> Result<DocumentStore> {
        let path = self.store_path();

        if !path.exists() {
            return Ok(DocumentStore::new());
        }

        let json = fs::read_to_string(&path)
            .context("Failed to read document store file")?;

        let store: DocumentStore = serde_json::from_str(&json)
            .context("Failed to deserialize document store")?;

        Ok(store)
    }

    /// Save the store to disk
    pub fn save(&self, store: &DocumentStore) -> Result<()> {
        let json = serde_json::to_string_pretty(store)
            .context("Failed to serialize document store")?;

        fs::write(self.store_path(), json)
            .context("Failed to write document store file")?;

        Ok(())
    }
}
