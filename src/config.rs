//! Configuration types for document field extraction.
//!
//! All extraction behaviour is controlled through [`ExtractionConfig`], built
//! via its [`ExtractionConfigBuilder`]. The defaults reproduce a local
//! deployment of the extraction service: `http://127.0.0.1:8000/extract-fields`,
//! values shown exactly as returned, and stale responses ignored.

use crate::error::ExtractError;
use serde::{Deserialize, Serialize};

/// Endpoint of a locally running extraction service.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/extract-fields";

/// Configuration for talking to the extraction service.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use edgequake_fields::{ExtractionConfig, SubmissionOrdering};
///
/// let config = ExtractionConfig::builder()
///     .endpoint("http://10.0.0.5:8000/extract-fields")
///     .ordering(SubmissionOrdering::LastResolvedWins)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Absolute http(s) URL the upload is POSTed to.
    pub endpoint: String,

    /// What to do when several submissions are in flight at once.
    /// Default: [`SubmissionOrdering::LatestSubmissionWins`].
    pub ordering: SubmissionOrdering,

    /// Reduce each returned value to its core (see [`crate::pipeline::normalize`]).
    /// Default: false, values are shown exactly as the service sent them.
    pub normalize_values: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            ordering: SubmissionOrdering::default(),
            normalize_values: false,
        }
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Build the HTTP client used for uploads.
    ///
    /// No timeout and no default headers are set: a hung service blocks the
    /// submission until the connection closes.
    pub fn http_client(&self) -> Result<reqwest::Client, ExtractError> {
        reqwest::Client::builder()
            .build()
            .map_err(|e| ExtractError::Internal(format!("Failed to build HTTP client: {e}")))
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    pub fn ordering(mut self, ordering: SubmissionOrdering) -> Self {
        self.config.ordering = ordering;
        self
    }

    pub fn normalize_values(mut self, v: bool) -> Self {
        self.config.normalize_values = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, ExtractError> {
        let url = reqwest::Url::parse(self.config.endpoint.trim()).map_err(|e| {
            ExtractError::InvalidConfig(format!(
                "endpoint '{}' is not a valid URL: {e}",
                self.config.endpoint
            ))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ExtractError::InvalidConfig(format!(
                "endpoint must use http or https, got '{}'",
                url.scheme()
            )));
        }
        Ok(ExtractionConfig {
            endpoint: url.to_string(),
            ..self.config
        })
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Policy for overlapping submissions.
///
/// Every submission takes a ticket from a counter when it starts. Under
/// `LatestSubmissionWins` a response is applied only if its ticket is still
/// the newest one; older responses are dropped without touching the view.
/// `LastResolvedWins` applies every response in arrival order, so a slow
/// early request can overwrite the result of a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubmissionOrdering {
    /// Ignore responses from submissions that have since been replaced. (default)
    #[default]
    LatestSubmissionWins,
    /// Apply every response; whichever resolves last wins.
    LastResolvedWins,
}
