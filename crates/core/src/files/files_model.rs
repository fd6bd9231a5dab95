//! Uploaded file model.

use std::path::Path;
use uuid::Uuid;

use crate::validation::FieldErrors;

/// A file received from a form upload, before it reaches storage.
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    /// Lower-cased extension of the original file name, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Records format and size problems for this upload under `field`.
    pub fn validate(
        &self,
        field: &str,
        allowed_extensions: &[&str],
        max_bytes: usize,
        errors: &mut FieldErrors,
    ) {
        if self.bytes.is_empty() {
            errors.add(field, format!("{} is required", field));
            return;
        }
        match self.extension() {
            Some(ext) if allowed_extensions.contains(&ext.as_str()) => {}
            _ => errors.add(
                field,
                format!(
                    "{} must be a file of type: {}",
                    field,
                    allowed_extensions.join(", ")
                ),
            ),
        }
        if self.size() > max_bytes {
            errors.add(
                field,
                format!(
                    "{} may not be greater than {} kilobytes",
                    field,
                    max_bytes / 1024
                ),
            );
        }
    }
}

/// Builds a collision-free storage path `{folder}/{uuid}.{extension}`.
pub fn stored_name(folder: &str, extension: &str) -> String {
    format!("{}/{}.{}", folder, Uuid::new_v4(), extension)
}
