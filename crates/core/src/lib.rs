//! # Inventory Core
//!
//! Core business logic for the inventory service.
//!
//! This crate contains pure data operations over the inventory store:
//! - The [`InventoryItem`] record and the request shapes that create or change it
//! - The [`InventoryRepository`] abstraction over the single JSON store file
//! - [`InventoryService`], which implements register/list/get/update/photo/delete/search
//!
//! **No API concerns**: HTTP routing, multipart parsing and status codes belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;

pub use config::CoreConfig;
pub use constants::DEFAULT_STORE_FILENAME;
pub use error::{InventoryError, InventoryResult};
pub use model::{InventoryItem, ItemChanges, ItemName, NewItem, PhotoUpload};
pub use repository::{InMemoryRepository, InventoryRepository, JsonFileRepository};
pub use service::InventoryService;

pub use inventory_files::{PhotoStore, PHOTOS_URL_PREFIX};
pub use inventory_ids::{IdGenerator, ItemId, SequentialIdGenerator, TimestampIdGenerator};
