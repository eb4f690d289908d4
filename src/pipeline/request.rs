//! The single network call: POST the multipart body, collect status + body.
//!
//! This is the only stage with network I/O. It applies no retry and no
//! timeout; a request that fails is reported once and the caller decides
//! what to do next.

use crate::error::ExtractError;
use crate::pipeline::response;
use crate::pipeline::upload::{self, UploadFile};
use reqwest::StatusCode;
use std::time::Instant;
use tracing::{debug, info};

/// Raw result of one POST to the extraction service.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Always a success status; other statuses return [`ExtractError::HttpStatus`]
    /// from [`post_upload`] before the body is read.
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub duration_ms: u64,
}

/// Send `upload` (or an empty `file` part) to `endpoint`.
///
/// A non-success status short-circuits before the body is read and comes
/// back as [`ExtractError::HttpStatus`].
pub async fn post_upload(
    client: &reqwest::Client,
    endpoint: &str,
    upload: Option<&UploadFile>,
) -> Result<RawResponse, ExtractError> {
    let start = Instant::now();
    let form = upload::build_form(upload)?;

    match upload {
        Some(u) => info!(
            "Uploading '{}' ({} bytes, {}) to {}",
            u.file_name,
            u.len(),
            u.content_type,
            endpoint
        ),
        None => info!("Submitting without a file to {}", endpoint),
    }

    let resp = client
        .post(endpoint)
        .multipart(form)
        .send()
        .await
        .map_err(|e| ExtractError::Network {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

    let status = resp.status();
    debug!("{} answered HTTP {}", endpoint, status);
    response::check_status(endpoint, status)?;

    let body = resp.bytes().await.map_err(|e| ExtractError::BodyRead {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })?;

    Ok(RawResponse {
        status,
        body: body.to_vec(),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}
