//! Inventory store persistence.
//!
//! The whole store is one ordered list of [`InventoryItem`]s. Every operation loads the full
//! list and mutating operations save the full list back; there is no partial update.
//!
//! ## Storage Layout
//!
//! ```text
//! inventory.json    # pretty-printed JSON array, insertion order
//! ```
//!
//! [`JsonFileRepository::save`] writes to a temporary file in the same directory and renames it
//! over the store, so readers never observe a half-written file.

use crate::model::InventoryItem;
use crate::{InventoryError, InventoryResult};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Load/save access to the full inventory list.
pub trait InventoryRepository: Send + Sync {
    /// Returns every record in store order.
    fn load(&self) -> InventoryResult<Vec<InventoryItem>>;

    /// Replaces the store contents with `items`.
    fn save(&self, items: &[InventoryItem]) -> InventoryResult<()>;
}

/// Repository backed by a single JSON file.
///
/// The file must already exist; [`Self::load`] fails with `StoreRead` if it does not.
#[derive(Clone, Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl InventoryRepository for JsonFileRepository {
    fn load(&self) -> InventoryResult<Vec<InventoryItem>> {
        let raw = fs::read(&self.path).map_err(|source| InventoryError::StoreRead {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_slice(&raw).map_err(|source| InventoryError::StoreDeserialization {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, items: &[InventoryItem]) -> InventoryResult<()> {
        let json = serde_json::to_vec_pretty(items).map_err(InventoryError::StoreSerialization)?;

        let write_err = |source: std::io::Error| InventoryError::StoreWrite {
            path: self.path.clone(),
            source,
        };

        let mut tmp = tempfile::NamedTempFile::new_in(self.parent_dir()).map_err(write_err)?;
        tmp.write_all(&json).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        Ok(())
    }
}

/// Repository held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    items: Mutex<Vec<InventoryItem>>,
}

impl InMemoryRepository {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }
}

impl InventoryRepository for InMemoryRepository {
    fn load(&self) -> InventoryResult<Vec<InventoryItem>> {
        let items = self
            .items
            .lock()
            .map_err(|_| InventoryError::LockPoisoned)?;
        Ok(items.clone())
    }

    fn save(&self, items: &[InventoryItem]) -> InventoryResult<()> {
        let mut stored = self
            .items
            .lock()
            .map_err(|_| InventoryError::LockPoisoned)?;
        *stored = items.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_ids::ItemId;
    use tempfile::TempDir;

    fn item(id: i64, name: &str) -> InventoryItem {
        InventoryItem::new(ItemId::new(id), name, "", None)
    }

    #[test]
    fn test_load_missing_file_is_store_read_error() {
        let temp = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(temp.path().join("inventory.json"));

        assert!(matches!(repo.load(), Err(InventoryError::StoreRead { .. })));
    }

    #[test]
    fn test_load_invalid_json_is_deserialization_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("inventory.json");
        fs::write(&path, "{ not json").unwrap();

        let repo = JsonFileRepository::new(&path);
        assert!(matches!(
            repo.load(),
            Err(InventoryError::StoreDeserialization { .. })
        ));
    }

    #[test]
    fn test_load_empty_array() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("inventory.json");
        fs::write(&path, "[]").unwrap();

        let repo = JsonFileRepository::new(&path);
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("inventory.json");
        fs::write(&path, "[]").unwrap();
        let repo = JsonFileRepository::new(&path);

        let items = vec![item(3, "c"), item(1, "a"), item(2, "b")];
        repo.save(&items).unwrap();

        assert_eq!(repo.load().unwrap(), items);
    }

    #[test]
    fn test_save_writes_pretty_json_array() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("inventory.json");
        let repo = JsonFileRepository::new(&path);

        repo.save(&[item(1, "Widget")]).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("[\n  {"));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], 1);
        assert_eq!(value[0]["name"], "Widget");
        assert!(value[0]["photo"].is_null());
    }

    #[test]
    fn test_load_save_keeps_records_as_stored() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("inventory.json");
        let original = serde_json::json!([{"id": 1, "qty": 5}, {"id": 2}]);
        fs::write(&path, serde_json::to_vec_pretty(&original).unwrap()).unwrap();
        let repo = JsonFileRepository::new(&path);

        let items = repo.load().unwrap();
        assert_eq!(items[1].name(), "");
        repo.save(&items).unwrap();

        let raw = fs::read(&path).unwrap();
        assert_eq!(raw, serde_json::to_vec_pretty(&original).unwrap());
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("inventory.json");
        let repo = JsonFileRepository::new(&path);

        repo.save(&[item(1, "a")]).unwrap();
        repo.save(&[item(1, "a"), item(2, "b")]).unwrap();

        let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().flatten().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_in_memory_round_trip() {
        let repo = InMemoryRepository::default();
        assert!(repo.load().unwrap().is_empty());

        repo.save(&[item(1, "a")]).unwrap();
        assert_eq!(repo.load().unwrap(), vec![item(1, "a")]);
    }
}
