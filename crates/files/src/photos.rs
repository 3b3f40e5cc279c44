//! Cache-directory photo store implementation
//!
//! [`PhotoStore`] owns the mapping between three views of the same photo:
//!
//! - the **original filename** supplied by the uploading client,
//! - the **file name** on disk (`<millis>-<sanitised original>`),
//! - the **reference** stored in a record and served over HTTP (`/photos/<file name>`).
//!
//! # Security Model
//!
//! - Original filenames are reduced to their final path component before use, so an upload
//!   named `../../etc/passwd` lands in the cache directory as `<millis>-passwd`.
//! - References are only resolved when they name a single file directly under the cache
//!   directory; anything with separators or dot segments is rejected.
//! - Files are opened with `create_new`, so an existing photo is never truncated.

use crate::constants::{FALLBACK_FILENAME, MAX_NAME_ATTEMPTS, PHOTOS_URL_PREFIX};
use crate::{FilesError, FilesResult};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Metadata for a photo written by [`PhotoStore::save`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPhoto {
    /// Name of the file inside the cache directory
    pub file_name: String,

    /// Value to store in a record's `photo` field (`/photos/<file_name>`)
    pub reference: String,

    /// Filename as supplied by the client, before sanitising
    pub original_filename: String,

    /// Size of the file in bytes
    pub size_bytes: u64,

    /// Detected media type, if the content was recognised
    pub media_type: Option<String>,

    /// UTC time the upload was written
    pub stored_at: DateTime<Utc>,
}

/// Service for writing photos to the cache directory and locating them again
#[derive(Debug, Clone)]
pub struct PhotoStore {
    cache_dir: PathBuf,
}

impl PhotoStore {
    /// Creates a store over an existing cache directory
    ///
    /// # Errors
    ///
    /// Returns `FilesError::InvalidRootDirectory` if the path does not exist, is not a
    /// directory, or cannot be canonicalised.
    pub fn new(cache_dir: &Path) -> FilesResult<Self> {
        if !cache_dir.exists() {
            return Err(FilesError::InvalidRootDirectory(format!(
                "Directory does not exist: {}",
                cache_dir.display()
            )));
        }

        if !cache_dir.is_dir() {
            return Err(FilesError::InvalidRootDirectory(format!(
                "Path is not a directory: {}",
                cache_dir.display()
            )));
        }

        let cache_dir = cache_dir.canonicalize().map_err(|e| {
            FilesError::InvalidRootDirectory(format!(
                "Cannot canonicalize path {}: {}",
                cache_dir.display(),
                e
            ))
        })?;

        Ok(Self { cache_dir })
    }

    /// Returns the canonicalised cache directory
    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Writes an uploaded photo into the cache directory
    ///
    /// The file is named `<millis>-<original filename>`. If that name is taken the millisecond
    /// prefix is incremented until a free name is found.
    ///
    /// # Errors
    ///
    /// Returns `FilesError` if:
    /// - no free name is found within a bounded number of attempts
    /// - the file cannot be created or written (I/O)
    pub fn save(&self, original_filename: &str, bytes: &[u8]) -> FilesResult<StoredPhoto> {
        let safe_name = sanitise_filename(original_filename);
        let stored_at = Utc::now();
        let mut millis = stored_at.timestamp_millis();

        for _ in 0..MAX_NAME_ATTEMPTS {
            let file_name = format!("{}-{}", millis, safe_name);
            let path = self.cache_dir.join(&file_name);

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    millis += 1;
                    continue;
                }
                Err(e) => {
                    return Err(FilesError::Io(std::io::Error::new(
                        e.kind(),
                        format!("Failed to create photo file {}: {}", path.display(), e),
                    )))
                }
            };

            file.write_all(bytes).map_err(|e| {
                FilesError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to write photo file {}: {}", path.display(), e),
                ))
            })?;

            return Ok(StoredPhoto {
                reference: reference_for(&file_name),
                file_name,
                original_filename: original_filename.to_string(),
                size_bytes: bytes.len() as u64,
                media_type: detect_media_type(bytes),
                stored_at,
            });
        }

        Err(FilesError::FileAlreadyExists(safe_name))
    }

    /// Maps a `/photos/<file_name>` reference to its path in the cache directory
    ///
    /// # Errors
    ///
    /// Returns `FilesError` if:
    /// - the reference is not a single file name under the photos prefix (`InvalidPath`)
    /// - no regular file exists at the resolved path (`NotFound`)
    pub fn resolve(&self, reference: &str) -> FilesResult<PathBuf> {
        let file_name = reference
            .strip_prefix(PHOTOS_URL_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| FilesError::InvalidPath(reference.to_string()))?;

        if !is_plain_file_name(file_name) {
            return Err(FilesError::InvalidPath(reference.to_string()));
        }

        let path = self.cache_dir.join(file_name);
        if !path.is_file() {
            return Err(FilesError::NotFound(reference.to_string()));
        }

        Ok(path)
    }
}

fn reference_for(file_name: &str) -> String {
    format!("{}/{}", PHOTOS_URL_PREFIX, file_name)
}

fn detect_media_type(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|kind| kind.mime_type().to_string())
}

/// Reduces a client-supplied filename to a safe single path component.
fn sanitise_filename(original: &str) -> String {
    let last = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        FALLBACK_FILENAME.to_string()
    } else {
        cleaned.to_string()
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.chars().any(|c| c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // Minimal PNG signature, enough for content sniffing
    const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    fn create_store() -> (TempDir, PhotoStore) {
        let temp = TempDir::new().unwrap();
        let cache = temp.path().join("cache");
        fs::create_dir_all(&cache).unwrap();
        let store = PhotoStore::new(&cache).unwrap();
        (temp, store)
    }

    #[test]
    fn test_photo_store_new_success() {
        let (_temp, store) = create_store();
        assert!(store.cache_dir().ends_with("cache"));
        assert!(store.cache_dir().is_absolute());
    }

    #[test]
    fn test_photo_store_root_not_exists() {
        let temp = TempDir::new().unwrap();
        let result = PhotoStore::new(&temp.path().join("missing"));

        assert!(matches!(result, Err(FilesError::InvalidRootDirectory(_))));
    }

    #[test]
    fn test_photo_store_root_not_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "not a directory").unwrap();

        let result = PhotoStore::new(&file);
        assert!(matches!(result, Err(FilesError::InvalidRootDirectory(_))));
    }

    #[test]
    fn test_save_writes_timestamped_file() {
        let (_temp, store) = create_store();

        let stored = store.save("widget.png", PNG_BYTES).unwrap();

        let (millis, rest) = stored.file_name.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(rest, "widget.png");
        assert_eq!(stored.reference, format!("/photos/{}", stored.file_name));
        assert_eq!(stored.original_filename, "widget.png");
        assert_eq!(stored.size_bytes, PNG_BYTES.len() as u64);
        assert_eq!(stored.media_type.as_deref(), Some("image/png"));

        let on_disk = fs::read(store.cache_dir().join(&stored.file_name)).unwrap();
        assert_eq!(on_disk, PNG_BYTES);
    }

    #[test]
    fn test_save_same_name_never_overwrites() {
        let (_temp, store) = create_store();

        let first = store.save("same.txt", b"first").unwrap();
        let second = store.save("same.txt", b"second").unwrap();

        assert_ne!(first.file_name, second.file_name);
        assert_eq!(fs::read(store.resolve(&first.reference).unwrap()).unwrap(), b"first");
        assert_eq!(fs::read(store.resolve(&second.reference).unwrap()).unwrap(), b"second");
    }

    #[test]
    fn test_save_strips_directories_from_filename() {
        let (_temp, store) = create_store();

        let stored = store.save("../../etc/passwd", b"x").unwrap();
        assert!(stored.file_name.ends_with("-passwd"));
        assert!(store.cache_dir().join(&stored.file_name).is_file());

        let stored = store.save("C:\\Users\\me\\photo.jpg", b"x").unwrap();
        assert!(stored.file_name.ends_with("-photo.jpg"));
    }

    #[test]
    fn test_save_empty_filename_uses_fallback() {
        let (_temp, store) = create_store();

        for name in ["", "   ", "..", "dir/"] {
            let stored = store.save(name, b"x").unwrap();
            assert!(
                stored.file_name.ends_with("-upload"),
                "unexpected name for '{}': {}",
                name,
                stored.file_name
            );
        }
    }

    #[test]
    fn test_save_unrecognised_content_has_no_media_type() {
        let (_temp, store) = create_store();

        let stored = store.save("notes.txt", b"plain text").unwrap();

        assert_eq!(stored.media_type, None);
        assert_eq!(fs::read(store.resolve(&stored.reference).unwrap()).unwrap(), b"plain text");
    }

    #[test]
    fn test_resolve_rejects_foreign_references() {
        let (_temp, store) = create_store();

        for reference in [
            "photos/a.png",
            "/elsewhere/a.png",
            "/photos/",
            "/photos/../secret",
            "/photos/a/b.png",
            "/photosa.png",
        ] {
            assert!(
                matches!(store.resolve(reference), Err(FilesError::InvalidPath(_))),
                "expected '{}' to be rejected",
                reference
            );
        }
    }

    #[test]
    fn test_resolve_missing_file() {
        let (_temp, store) = create_store();

        let result = store.resolve("/photos/1-missing.png");
        assert!(matches!(result, Err(FilesError::NotFound(_))));
    }

    #[test]
    fn test_resolve_existing_file() {
        let (_temp, store) = create_store();
        let stored = store.save("a.png", PNG_BYTES).unwrap();

        let path = store.resolve(&stored.reference).unwrap();
        assert!(path.starts_with(store.cache_dir()));
        assert!(path.ends_with(&stored.file_name));
    }
}
