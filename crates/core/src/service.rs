//! Inventory operations.
//!
//! [`InventoryService`] implements every operation exposed over HTTP as a full
//! load → modify → save cycle against an [`InventoryRepository`].
//!
//! ## Concurrency
//!
//! Mutating operations run under a service-wide mutex so two writers cannot interleave their
//! load and save steps. Reads do not take the lock; the repository guarantees they see either
//! the old or the new store, never a partial one.
//!
//! ## Photos
//!
//! Uploads are written to the [`PhotoStore`] before the record that references them is saved.
//! Replacing a photo or deleting an item leaves the previous file on disk.

use crate::config::CoreConfig;
use crate::error::{InventoryError, InventoryResult};
use crate::model::{InventoryItem, ItemChanges, ItemName, NewItem, PhotoUpload};
use crate::repository::{InventoryRepository, JsonFileRepository};
use inventory_files::{FilesError, PhotoStore};
use inventory_ids::{IdGenerator, ItemId, TimestampIdGenerator};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

/// Service for inventory record operations.
pub struct InventoryService {
    repository: Box<dyn InventoryRepository>,
    ids: Box<dyn IdGenerator>,
    photos: PhotoStore,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for InventoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryService")
            .field("photos", &self.photos)
            .finish_non_exhaustive()
    }
}

impl InventoryService {
    pub fn new(
        repository: impl InventoryRepository + 'static,
        ids: impl IdGenerator + 'static,
        photos: PhotoStore,
    ) -> Self {
        Self {
            repository: Box::new(repository),
            ids: Box::new(ids),
            photos,
            write_lock: Mutex::new(()),
        }
    }

    /// Builds the production service: JSON file store, timestamp ids, cache-dir photos.
    ///
    /// The cache directory must already exist (see [`CoreConfig::ensure_cache_dir`]).
    pub fn from_config(cfg: &CoreConfig) -> InventoryResult<Self> {
        let photos = PhotoStore::new(cfg.cache_dir())?;
        Ok(Self::new(
            JsonFileRepository::new(cfg.store_path()),
            TimestampIdGenerator::new(),
            photos,
        ))
    }

    pub fn photos(&self) -> &PhotoStore {
        &self.photos
    }

    /// Creates a new record.
    ///
    /// # Errors
    ///
    /// - `NameRequired` if the name is missing or blank; nothing is written
    /// - `Id` if no id above the highest stored one is left; nothing is written
    /// - store read/write or photo write failures
    pub fn register(&self, new_item: NewItem) -> InventoryResult<InventoryItem> {
        let name = ItemName::new(new_item.name.unwrap_or_default())?;
        let description = new_item
            .description
            .map(|d| d.trim().to_string())
            .unwrap_or_default();

        let _guard = self.lock()?;
        let mut items = self.repository.load()?;

        let last = items.iter().map(|item| item.id).max();
        let id = self.ids.next_id(last)?;

        let photo = new_item
            .photo
            .map(|upload| self.store_photo(upload))
            .transpose()?;

        let item = InventoryItem::new(id, name.into_string(), description, photo);

        items.push(item.clone());
        self.repository.save(&items)?;

        tracing::info!("registered inventory item {}", item.id);
        Ok(item)
    }

    /// Returns every record in store order.
    pub fn list(&self) -> InventoryResult<Vec<InventoryItem>> {
        self.repository.load()
    }

    pub fn get(&self, id: ItemId) -> InventoryResult<InventoryItem> {
        let items = self.repository.load()?;
        let index = position(&items, id)?;
        Ok(items[index].clone())
    }

    /// Overwrites `name` and/or `description`. Empty values are ignored.
    pub fn update(&self, id: ItemId, changes: ItemChanges) -> InventoryResult<InventoryItem> {
        let _guard = self.lock()?;
        let mut items = self.repository.load()?;
        let index = position(&items, id)?;

        items[index].apply_changes(changes);
        self.repository.save(&items)?;

        tracing::info!("updated inventory item {}", id);
        Ok(items[index].clone())
    }

    /// Locates the photo file attached to a record.
    ///
    /// # Errors
    ///
    /// `PhotoNotFound` if the record has no photo or its reference does not resolve to a file
    /// in the cache directory.
    pub fn photo_file(&self, id: ItemId) -> InventoryResult<PathBuf> {
        let item = self.get(id)?;
        let reference = item.photo().ok_or(InventoryError::PhotoNotFound(id))?;

        match self.photos.resolve(reference) {
            Ok(path) => Ok(path),
            Err(FilesError::NotFound(_) | FilesError::InvalidPath(_)) => {
                tracing::warn!("inventory item {} references missing photo {}", id, reference);
                Err(InventoryError::PhotoNotFound(id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Points a record at a newly uploaded photo.
    ///
    /// With no upload the record is saved back unchanged. The previous photo file is kept.
    pub fn replace_photo(
        &self,
        id: ItemId,
        upload: Option<PhotoUpload>,
    ) -> InventoryResult<InventoryItem> {
        let _guard = self.lock()?;
        let mut items = self.repository.load()?;
        let index = position(&items, id)?;

        if let Some(upload) = upload {
            let reference = self.store_photo(upload)?;
            items[index].set_photo(reference);
            tracing::info!("replaced photo of inventory item {}", id);
        }

        self.repository.save(&items)?;
        Ok(items[index].clone())
    }

    /// Removes a record and returns it. Its photo file is kept.
    pub fn delete(&self, id: ItemId) -> InventoryResult<InventoryItem> {
        let _guard = self.lock()?;
        let mut items = self.repository.load()?;
        let index = position(&items, id)?;

        let removed = items.remove(index);
        self.repository.save(&items)?;

        tracing::info!("deleted inventory item {}", id);
        Ok(removed)
    }

    /// Looks up a record; with `has_photo` the description in the result names the photo.
    ///
    /// Read-only: the annotation is never written back.
    pub fn search(&self, id: ItemId, has_photo: bool) -> InventoryResult<InventoryItem> {
        let item = self.get(id)?;
        if has_photo {
            Ok(item.with_photo_note())
        } else {
            Ok(item)
        }
    }

    fn store_photo(&self, upload: PhotoUpload) -> InventoryResult<String> {
        let stored = self.photos.save(&upload.filename, &upload.bytes)?;
        tracing::debug!(
            "stored photo {} ({} bytes, {})",
            stored.file_name,
            stored.size_bytes,
            stored.media_type.as_deref().unwrap_or("unknown type")
        );
        Ok(stored.reference)
    }

    fn lock(&self) -> InventoryResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| InventoryError::LockPoisoned)
    }
}

fn position(items: &[InventoryItem], id: ItemId) -> InventoryResult<usize> {
    items
        .iter()
        .position(|item| item.id == id)
        .ok_or(InventoryError::NotFound(id))
}
