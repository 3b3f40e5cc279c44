//! Inventory route handlers.

use crate::extract::FormFields;
use crate::{ApiError, AppState};
use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use inventory_core::{InventoryItem, ItemChanges, ItemId, NewItem};
use serde::Serialize;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageRes {
    #[schema(example = "Deleted")]
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorRes {
    #[schema(example = "Inventory name is required")]
    pub error: String,
}

/// An inventory record as returned by the API (documentation only)
///
/// Records read from the store are returned as stored, so `name`, `description` and `photo` may
/// be absent and extra fields may appear.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ItemRes {
    #[schema(example = 1718000000000_i64)]
    id: i64,
    #[schema(example = "Widget")]
    name: Option<String>,
    #[schema(example = "Blue, 3 inch")]
    description: Option<String>,
    /// Reference to the stored photo (`/photos/<file>`), or null
    #[schema(example = "/photos/1718000000000-widget.jpg")]
    photo: Option<String>,
}

/// Multipart body for `POST /register` (documentation only)
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct RegisterReq {
    inventory_name: String,
    description: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    photo: Option<Vec<u8>>,
}

/// Multipart body for `PUT /inventory/{id}/photo` (documentation only)
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct PhotoReq {
    #[schema(value_type = Option<String>, format = Binary)]
    photo: Option<Vec<u8>>,
}

/// Form body for `POST /search` (documentation only)
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct SearchReq {
    #[schema(example = "1718000000000")]
    id: String,
    /// Any non-empty value appends the photo reference to the description
    #[schema(example = "on")]
    has_photo: Option<String>,
}

/// Ids that do not parse can never match a record.
fn parse_id(raw: &str) -> Result<ItemId, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
pub async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Inventory service is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/register",
    request_body(content = RegisterReq, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Item created", body = ItemRes),
        (status = 400, description = "Inventory name missing", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Register a new inventory item
///
/// Accepts `inventory_name` (required), `description` and an optional `photo` file. The photo
/// is written to the cache directory before the record is saved.
///
/// # Errors
/// Returns `400 Bad Request` if `inventory_name` is missing or blank.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    mut form: FormFields,
) -> Result<(StatusCode, Json<InventoryItem>), ApiError> {
    let new_item = NewItem {
        name: form.take_text("inventory_name"),
        description: form.take_text("description"),
        photo: form.take_photo(),
    };

    let item = state.service().register(new_item)?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    get,
    path = "/inventory",
    responses(
        (status = 200, description = "All inventory items in insertion order", body = [ItemRes]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List every inventory item
#[axum::debug_handler]
pub async fn list_inventory(
    State(state): State<AppState>,
) -> Result<Json<Vec<InventoryItem>>, ApiError> {
    Ok(Json(state.service().list()?))
}

#[utoipa::path(
    get,
    path = "/inventory/{id}",
    params(("id" = i64, Path, description = "Inventory item id")),
    responses(
        (status = 200, description = "Inventory item", body = ItemRes),
        (status = 404, description = "No item with this id")
    )
)]
#[axum::debug_handler]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InventoryItem>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.service().get(id)?))
}

#[utoipa::path(
    put,
    path = "/inventory/{id}",
    params(("id" = i64, Path, description = "Inventory item id")),
    request_body = ItemChanges,
    responses(
        (status = 200, description = "Updated inventory item", body = ItemRes),
        (status = 404, description = "No item with this id")
    )
)]
/// Update an item's name and/or description
///
/// Empty strings leave the corresponding field unchanged. A missing or unparseable JSON body is
/// treated as an empty update.
#[axum::debug_handler]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    changes: Option<Json<ItemChanges>>,
) -> Result<Json<InventoryItem>, ApiError> {
    let id = parse_id(&id)?;
    let changes = changes.map(|Json(changes)| changes).unwrap_or_default();
    Ok(Json(state.service().update(id, changes)?))
}

#[utoipa::path(
    get,
    path = "/inventory/{id}/photo",
    params(("id" = i64, Path, description = "Inventory item id")),
    responses(
        (status = 200, description = "Raw photo bytes", content_type = "application/octet-stream"),
        (status = 404, description = "No item with this id, or the item has no photo")
    )
)]
/// Fetch the photo attached to an item
///
/// The file is streamed from the cache directory with a content type guessed from its
/// extension. Range and conditional requests are honoured.
#[axum::debug_handler]
pub async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let path = state.service().photo_file(id)?;

    let response = ServeFile::new(path)
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {});
    Ok(response.into_response())
}

#[utoipa::path(
    put,
    path = "/inventory/{id}/photo",
    params(("id" = i64, Path, description = "Inventory item id")),
    request_body(content = PhotoReq, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Inventory item with its new photo", body = ItemRes),
        (status = 404, description = "No item with this id")
    )
)]
/// Replace an item's photo
///
/// Without a `photo` file the item is returned unchanged. The previous photo file stays in the
/// cache directory.
#[axum::debug_handler]
pub async fn replace_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut form: FormFields,
) -> Result<Json<InventoryItem>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.service().replace_photo(id, form.take_photo())?))
}

#[utoipa::path(
    delete,
    path = "/inventory/{id}",
    params(("id" = i64, Path, description = "Inventory item id")),
    responses(
        (status = 200, description = "Item deleted", body = MessageRes),
        (status = 404, description = "No item with this id")
    )
)]
#[axum::debug_handler]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageRes>, ApiError> {
    let id = parse_id(&id)?;
    state.service().delete(id)?;
    Ok(Json(MessageRes {
        message: "Deleted".into(),
    }))
}

#[utoipa::path(
    post,
    path = "/search",
    request_body(content = SearchReq, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Inventory item, description annotated when has_photo is set", body = ItemRes),
        (status = 404, description = "No item with this id")
    )
)]
/// Look up an item by id from a form
///
/// When `has_photo` is set the returned description ends with `(photo: <reference>)`. The stored
/// item is not modified.
#[axum::debug_handler]
pub async fn search(
    State(state): State<AppState>,
    form: FormFields,
) -> Result<Json<InventoryItem>, ApiError> {
    let id = parse_id(form.text("id").ok_or(ApiError::NotFound)?)?;
    let has_photo = form.is_set("has_photo");
    Ok(Json(state.service().search(id, has_photo)?))
}
