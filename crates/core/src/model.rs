//! Inventory record and request shapes.
//!
//! [`InventoryItem`] is both the stored record and the JSON returned to clients. The store file is
//! a plain JSON array of these objects and only `id` is required in each. Fields this service
//! does not know about, and known fields that are absent, survive a load and save unchanged.

use crate::constants::NO_PHOTO_MARKER;
use crate::{InventoryError, InventoryResult};
use inventory_ids::ItemId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A single inventory entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    /// Outer `None` when the key is absent, inner `None` for an explicit null.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    photo: Option<Option<String>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Marks a key as present even when its value is null.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl InventoryItem {
    /// A record with every known field set, as written by registration.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        description: impl Into<String>,
        photo: Option<String>,
    ) -> Self {
        Self {
            id,
            name: Some(name.into()),
            description: Some(description.into()),
            photo: Some(photo),
            extra: Map::new(),
        }
    }

    /// The name, or `""` when the record has none.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// The description, or `""` when the record has none.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Reference to the stored photo (`/photos/<file>`), if any.
    pub fn photo(&self) -> Option<&str> {
        self.photo.as_ref().and_then(|photo| photo.as_deref())
    }

    pub fn set_photo(&mut self, reference: impl Into<String>) {
        self.photo = Some(Some(reference.into()));
    }

    /// Fields kept from the store that this service does not interpret.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Applies an update request.
    ///
    /// A field is only overwritten when the request carries a non-empty value for it. An empty
    /// string counts as "not provided", so `name: ""` leaves the name untouched. A whitespace-only
    /// name is ignored as well so a stored name is never blank.
    pub fn apply_changes(&mut self, changes: ItemChanges) {
        if let Some(name) = changes.name.and_then(|n| ItemName::new(n).ok()) {
            self.name = Some(name.into_string());
        }

        if let Some(description) = changes.description.filter(|d| !d.is_empty()) {
            self.description = Some(description.trim().to_string());
        }
    }

    /// Copy of this item with the photo reference appended to its description.
    ///
    /// Used by search; the stored record is not touched.
    #[must_use]
    pub fn with_photo_note(&self) -> Self {
        let photo = self.photo().unwrap_or(NO_PHOTO_MARKER);
        Self {
            description: Some(format!("{} (photo: {})", self.description(), photo)),
            ..self.clone()
        }
    }
}

/// An item name that is guaranteed non-blank.
///
/// Input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName(String);

impl ItemName {
    /// Returns `InventoryError::NameRequired` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> InventoryResult<Self> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InventoryError::NameRequired);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ItemName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An uploaded photo as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Input to [`crate::InventoryService::register`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub photo: Option<PhotoUpload>,
}

impl NewItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Input to [`crate::InventoryService::update`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct ItemChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
