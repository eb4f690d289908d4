//! Upload construction: turn the selected file into the multipart body.
//!
//! The service expects exactly one part named `file`. When nothing is
//! selected the part is still sent, as an empty text value, and the service
//! decides what to do with it.

use crate::error::ExtractError;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::debug;

/// Name of the multipart part carrying the document.
pub const FILE_FIELD: &str = "file";

/// A document selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Wrap in-memory bytes, guessing the content type from the file name.
    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Override the guessed content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Read a local file into an [`UploadFile`].
pub async fn load_file(path: impl AsRef<Path>) -> Result<UploadFile, ExtractError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ExtractError::UploadRead {
            path: path.to_path_buf(),
            source,
        })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    debug!("Loaded upload {} ({} bytes)", path.display(), bytes.len());
    Ok(UploadFile::from_bytes(file_name, bytes))
}

/// Build the multipart body for one submission.
pub fn build_form(upload: Option<&UploadFile>) -> Result<Form, ExtractError> {
    let Some(upload) = upload else {
        debug!("No file selected; sending an empty '{}' part", FILE_FIELD);
        return Ok(Form::new().text(FILE_FIELD, ""));
    };

    let part = Part::bytes(upload.bytes.clone())
        .file_name(upload.file_name.clone())
        .mime_str(&upload.content_type)
        .map_err(|e| {
            ExtractError::Internal(format!(
                "invalid content type '{}' for '{}': {e}",
                upload.content_type, upload.file_name
            ))
        })?;

    Ok(Form::new().part(FILE_FIELD, part))
}

/// Guess a MIME type from the file extension.
pub fn guess_content_type(file_name: &str) -> &'static str {
    let ext = match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => return "application/octet-stream",
    };
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "tif" | "tiff" => "image/tiff",
        "bmp" => "image/bmp",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
