use inventory_ids::ItemId;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Inventory name is required")]
    NameRequired,
    #[error("inventory item not found: {0}")]
    NotFound(ItemId),
    #[error("inventory item {0} has no photo")]
    PhotoNotFound(ItemId),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "failed to create cache directory {path}: {source}",
        path = path.display()
    )]
    CacheDirCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "failed to read inventory store {path}: {source}",
        path = path.display()
    )]
    StoreRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "failed to parse inventory store {path}: {source}",
        path = path.display()
    )]
    StoreDeserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize inventory store: {0}")]
    StoreSerialization(serde_json::Error),
    #[error(
        "failed to write inventory store {path}: {source}",
        path = path.display()
    )]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("inventory store lock poisoned")]
    LockPoisoned,

    #[error("id allocation failed: {0}")]
    Id(#[from] inventory_ids::IdError),
    #[error("photo storage error: {0}")]
    Photo(#[from] inventory_files::FilesError),
}

pub type InventoryResult<T> = std::result::Result<T, InventoryError>;
