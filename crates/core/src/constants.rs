//! Constants used throughout the inventory core crate.

/// Default store filename, resolved against the working directory.
pub const DEFAULT_STORE_FILENAME: &str = "inventory.json";

/// Placeholder written into search annotations when an item has no photo.
pub const NO_PHOTO_MARKER: &str = "null";
