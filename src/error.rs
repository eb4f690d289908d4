//! Error types for the edgequake-fields library.
//!
//! Every failure a submission can hit falls into one of three kinds,
//! reported by [`ExtractError::kind`]:
//!
//! * [`FailureKind::Transport`]: the request never produced a 2xx response
//!   (connection refused, HTTP 500, ...). The user only ever sees the fixed
//!   [`TRANSPORT_FAILURE_MESSAGE`]; detail goes to the log.
//!
//! * [`FailureKind::Application`]: the service answered 2xx but put an
//!   `error` key in its JSON body. The service's text is shown verbatim,
//!   prefixed with `Error: `.
//!
//! * [`FailureKind::Unexpected`]: anything else (unparseable body, unreadable
//!   upload, poisoned view lock). Logged on the diagnostic channel and shown
//!   as the fixed [`UNEXPECTED_FAILURE_MESSAGE`].

use std::path::PathBuf;
use thiserror::Error;

/// Shown for every transport-level failure, whatever the response body says.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to extract fields from the document.";

/// Shown for every failure that is neither transport nor application level.
pub const UNEXPECTED_FAILURE_MESSAGE: &str = "An error occurred while processing the document.";

/// Coarse classification of an [`ExtractError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    Application,
    Unexpected,
}

/// All errors returned by the edgequake-fields library.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Transport errors ──────────────────────────────────────────────────
    /// The service answered with a status outside 200–299.
    #[error("Extraction service at '{endpoint}' returned HTTP {status}")]
    HttpStatus { endpoint: String, status: u16 },

    /// The request could not be delivered (DNS, refused connection, reset).
    #[error("Request to '{endpoint}' failed: {reason}")]
    Network { endpoint: String, reason: String },

    // ── Application errors ────────────────────────────────────────────────
    /// The service reported a failure in the `error` key of its JSON body.
    #[error("Error: {message}")]
    Service { message: String },

    // ── Unexpected errors ─────────────────────────────────────────────────
    /// The body of a successful response could not be read off the wire.
    #[error("Failed to read response body from '{endpoint}': {reason}")]
    BodyRead { endpoint: String, reason: String },

    /// The body of a successful response is not a usable JSON document.
    #[error("Malformed response body: {reason}")]
    MalformedResponse { reason: String },

    /// The selected upload could not be read from disk.
    #[error("Failed to read upload '{path}': {source}")]
    UploadRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ExtractError {
    /// Which of the three failure kinds this error belongs to.
    pub fn kind(&self) -> FailureKind {
        match self {
            ExtractError::HttpStatus { .. } | ExtractError::Network { .. } => FailureKind::Transport,
            ExtractError::Service { .. } => FailureKind::Application,
            ExtractError::BodyRead { .. }
            | ExtractError::MalformedResponse { .. }
            | ExtractError::UploadRead { .. }
            | ExtractError::InvalidConfig(_)
            | ExtractError::Internal(_) => FailureKind::Unexpected,
        }
    }

    /// The text a user is shown for this error.
    ///
    /// Only application errors forward detail; the other kinds map to a fixed
    /// message so nothing about the transport or internals leaks to the user.
    pub fn user_message(&self) -> String {
        match self.kind() {
            FailureKind::Transport => TRANSPORT_FAILURE_MESSAGE.to_string(),
            FailureKind::Application => self.to_string(),
            FailureKind::Unexpected => UNEXPECTED_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_message_is_prefixed() {
        let e = ExtractError::Service {
            message: "bad file".into(),
        };
        assert_eq!(e.kind(), FailureKind::Application);
        assert_eq!(e.user_message(), "Error: bad file");
    }

    #[test]
    fn http_status_hides_detail_from_user() {
        let e = ExtractError::HttpStatus {
            endpoint: "http://127.0.0.1:8000/extract-fields".into(),
            status: 500,
        };
        assert_eq!(e.kind(), FailureKind::Transport);
        assert_eq!(e.user_message(), TRANSPORT_FAILURE_MESSAGE);
        assert!(e.to_string().contains("500"));
    }

    #[test]
    fn network_error_is_transport() {
        let e = ExtractError::Network {
            endpoint: "http://localhost:1".into(),
            reason: "connection refused".into(),
        };
        assert_eq!(e.kind(), FailureKind::Transport);
        assert_eq!(e.user_message(), "Failed to extract fields from the document.");
    }

    #[test]
    fn malformed_body_is_unexpected() {
        let e = ExtractError::MalformedResponse {
            reason: "expected value at line 1 column 1".into(),
        };
        assert_eq!(e.kind(), FailureKind::Unexpected);
        assert_eq!(
            e.user_message(),
            "An error occurred while processing the document."
        );
    }

    #[test]
    fn upload_read_display_names_path() {
        let e = ExtractError::UploadRead {
            path: PathBuf::from("/tmp/missing.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.to_string().contains("/tmp/missing.pdf"));
        assert_eq!(e.kind(), FailureKind::Unexpected);
    }
}
