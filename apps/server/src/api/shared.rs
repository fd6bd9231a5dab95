use std::collections::HashMap;

use crate::error::{ApiError, ApiResult};
use axum::extract::Multipart;
use tracer_core::files::UploadedFile;

/// Text fields and files of one multipart form.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// Drains the request body. A part with a file name is kept as an upload.
    pub async fn read(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = MultipartForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(|e| {
                        ApiError::BadRequest(format!("Failed to read upload '{}': {}", name, e))
                    })?;
                    // An empty file input still submits a nameless part.
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.files.insert(
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        },
                    );
                }
                None => {
                    let value = field.text().await.map_err(|e| {
                        ApiError::BadRequest(format!("Failed to read field '{}': {}", name, e))
                    })?;
                    form.fields.insert(name, value);
                }
            }
        }
        Ok(form)
    }

    /// Text value of a field, empty when absent.
    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    /// Removes an uploaded file; an absent file becomes an empty upload so
    /// that validation reports it against the field.
    pub fn take_file(&mut self, name: &str) -> UploadedFile {
        self.files.remove(name).unwrap_or_default()
    }
}
