//! Headless extraction entry points.
//!
//! These functions run one request/response cycle and hand the result
//! straight back to the caller as a `Result`. Use them from services and
//! scripts; use [`crate::controller::ExtractionController`] when results
//! should land in a view model.

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::fields::ExtractedFields;
use crate::pipeline::upload::{self, UploadFile};
use crate::pipeline::{normalize, request, response};
use std::path::Path;
use tracing::info;

/// Send one document to the extraction service and return its fields.
///
/// `upload` may be `None`; the request is sent anyway with an empty `file`
/// part and the service's answer is interpreted as usual.
///
/// # Errors
/// See [`ExtractError::kind`] for the three failure kinds.
pub async fn extract(
    upload: Option<&UploadFile>,
    config: &ExtractionConfig,
) -> Result<ExtractedFields, ExtractError> {
    let client = config.http_client()?;
    extract_with_client(&client, upload, config).await
}

/// Like [`extract`], reusing a caller-owned HTTP client.
pub async fn extract_with_client(
    client: &reqwest::Client,
    upload: Option<&UploadFile>,
    config: &ExtractionConfig,
) -> Result<ExtractedFields, ExtractError> {
    let raw = request::post_upload(client, &config.endpoint, upload).await?;
    let fields = response::interpret(&config.endpoint, raw.status, &raw.body)?;
    info!(
        "Extraction complete in {}ms ({} of 6 fields filled)",
        raw.duration_ms,
        fields.iter().filter(|(_, v)| !v.is_empty()).count()
    );

    if config.normalize_values {
        Ok(normalize::normalize_fields(&fields))
    } else {
        Ok(fields)
    }
}

/// Read a local file and extract its fields.
pub async fn extract_file(
    path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractedFields, ExtractError> {
    let upload = upload::load_file(path).await?;
    extract(Some(&upload), config).await
}

/// Extract fields from a document held in memory.
///
/// `file_name` is sent as the part's file name and drives the content type.
pub async fn extract_bytes(
    file_name: impl Into<String>,
    bytes: impl Into<Vec<u8>>,
    config: &ExtractionConfig,
) -> Result<ExtractedFields, ExtractError> {
    let upload = UploadFile::from_bytes(file_name, bytes);
    extract(Some(&upload), config).await
}

/// Synchronous wrapper around [`extract_file`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_sync(
    path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractedFields, ExtractError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ExtractError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(extract_file(path, config))
}
