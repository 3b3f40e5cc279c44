//! Inventory photo storage
//!
//! Uploaded photos live as plain files in a single cache directory configured at startup.
//! Records never embed photo bytes; they hold a *reference* of the form `/photos/<file_name>`,
//! which is also the URL the HTTP layer serves the cache directory under.
//!
//! ## Layout
//!
//! ```text
//! <cache_dir>/
//! ├── 1718000000000-widget.jpg
//! ├── 1718000000417-widget.jpg
//! └── 1718000009999-gadget.png
//! ```
//!
//! File names are `<upload-millis>-<original-filename>`. Files are never overwritten: if the
//! name is already taken the timestamp is bumped until a free name is found. Files are never
//! deleted by this crate either, so replacing or deleting a record leaves its old photo behind.
//!
//! ## Example Usage
//!
//! ```no_run
//! use inventory_files::PhotoStore;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = PhotoStore::new(Path::new("cache"))?;
//! let stored = store.save("widget.jpg", b"...")?;
//! let path = store.resolve(&stored.reference)?;
//! assert!(path.starts_with(store.cache_dir()));
//! # Ok(())
//! # }
//! ```

mod constants;
mod photos;

pub use constants::PHOTOS_URL_PREFIX;
pub use photos::{PhotoStore, StoredPhoto};

/// Errors that can occur during photo file operations
#[derive(Debug, thiserror::Error)]
pub enum FilesError {
    /// Cache directory does not exist or is not a directory
    #[error("Invalid cache directory: {0}")]
    InvalidRootDirectory(String),

    /// Reference is not a single file name under the photos prefix
    #[error("Invalid photo reference: {0}")]
    InvalidPath(String),

    /// Reference is well-formed but no file exists for it
    #[error("Photo not found: {0}")]
    NotFound(String),

    /// Every candidate file name for an upload was already taken
    #[error("Could not find a free file name for upload: {0}")]
    FileAlreadyExists(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for photo file operations.
pub type FilesResult<T> = Result<T, FilesError>;
