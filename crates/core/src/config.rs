//! Core runtime configuration.
//!
//! Resolved once at process startup from the command line and passed into the service. Nothing
//! here is re-read while handling requests.

use crate::{InventoryError, InventoryResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    store_path: PathBuf,
    cache_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(store_path: PathBuf, cache_dir: PathBuf) -> InventoryResult<Self> {
        if store_path.as_os_str().is_empty() {
            return Err(InventoryError::InvalidConfig(
                "store path cannot be empty".into(),
            ));
        }
        if cache_dir.as_os_str().is_empty() {
            return Err(InventoryError::InvalidConfig(
                "cache directory cannot be empty".into(),
            ));
        }

        Ok(Self {
            store_path,
            cache_dir,
        })
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Whether the JSON store file is present. The service never creates it.
    pub fn store_exists(&self) -> bool {
        self.store_path.is_file()
    }

    /// Create the cache directory if it is missing.
    ///
    /// Returns `true` if the directory was created by this call.
    pub fn ensure_cache_dir(&self) -> InventoryResult<bool> {
        if self.cache_dir.is_dir() {
            return Ok(false);
        }

        std::fs::create_dir_all(&self.cache_dir).map_err(|source| {
            InventoryError::CacheDirCreation {
                path: self.cache_dir.clone(),
                source,
            }
        })?;
        Ok(true)
    }
}
