//! Form body extraction.
//!
//! The register, photo and search endpoints accept the same kinds of body as browser forms and
//! scripted clients send them: `multipart/form-data`, `application/x-www-form-urlencoded`, or a
//! JSON object. [`FormFields`] collapses all three into text fields plus an optional file.
//!
//! A body with any other content type (or none) yields no fields, which handlers then treat as
//! "field not provided".

use crate::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use inventory_core::PhotoUpload;
use std::collections::{HashMap, HashSet};

/// Name of the multipart field carrying the uploaded photo.
pub const PHOTO_FIELD: &str = "photo";

/// Text fields and an optional `photo` file from a form submission.
#[derive(Debug, Default)]
pub struct FormFields {
    fields: HashMap<String, String>,
    /// JSON fields holding a numeric zero: readable as text, but not set.
    zeroes: HashSet<String>,
    photo: Option<PhotoUpload>,
}

impl FormFields {
    /// Returns a text field. Repeated fields keep the last value.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Removes and returns a text field.
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Whether a field is present with a non-empty value. A JSON `0` is not set.
    pub fn is_set(&self, name: &str) -> bool {
        !self.zeroes.contains(name) && self.text(name).is_some_and(|value| !value.is_empty())
    }

    pub fn take_photo(&mut self) -> Option<PhotoUpload> {
        self.photo.take()
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = FormFields::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == PHOTO_FIELD {
                // A file input left empty still sends the part, with no filename
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .filter(|f| !f.is_empty());
                let bytes = field.bytes().await?;
                if let Some(filename) = filename {
                    form.photo = Some(PhotoUpload {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state).await?;
            Self::from_multipart(multipart).await
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state).await?;
            Ok(FormFields {
                fields,
                ..FormFields::default()
            })
        } else if content_type.starts_with("application/json") {
            let Json(object) =
                Json::<serde_json::Map<String, serde_json::Value>>::from_request(req, state)
                    .await?;

            let mut form = FormFields::default();
            for (key, value) in object {
                if value.as_f64() == Some(0.0) {
                    form.zeroes.insert(key.clone());
                }
                if let Some(text) = json_text(value) {
                    form.fields.insert(key, text);
                }
            }
            Ok(form)
        } else {
            Ok(FormFields::default())
        }
    }
}

/// Scalar JSON values as form text; `null`, `false`, arrays and objects count as absent.
fn json_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
