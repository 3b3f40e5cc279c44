//! Mapping from inventory errors to HTTP responses.
//!
//! | Error | Status | Body |
//! |---|---|---|
//! | name missing | 400 | `{"error": "Inventory name is required"}` |
//! | malformed request body | 400 | `{"error": "<reason>"}` |
//! | unknown id / no photo | 404 | empty |
//! | store or upload failure | 500 | `{"error": "Internal error"}` |

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inventory_core::InventoryError;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    /// Path or form id that matches no record, including ids that are not numbers
    NotFound,
    BadRequest(String),
    Inventory(InventoryError),
}

impl From<InventoryError> for ApiError {
    fn from(e: InventoryError) -> Self {
        ApiError::Inventory(e)
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(e: MultipartRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(e: FormRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    let message: String = message.into();
    (status, Json(json!({ "error": message }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::BadRequest(message) => error_body(StatusCode::BAD_REQUEST, message),
            ApiError::Inventory(e) => match e {
                InventoryError::NameRequired => error_body(StatusCode::BAD_REQUEST, e.to_string()),
                InventoryError::NotFound(_) | InventoryError::PhotoNotFound(_) => {
                    StatusCode::NOT_FOUND.into_response()
                }
                other => {
                    tracing::error!("Inventory error: {:?}", other);
                    error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
                }
            },
        }
    }
}
