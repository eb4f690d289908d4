//! # edgequake-fields
//!
//! Send a document to an extraction service and map the six fields it
//! returns onto a form.
//!
//! The service (OCR + language model, running elsewhere) accepts a
//! `multipart/form-data` POST with a single `file` part and answers with a
//! JSON object keyed by field label, or `{"error": "..."}`. This crate is the
//! client side of that contract.
//!
//! ## Pipeline Overview
//!
//! ```text
//! file
//!  │
//!  ├─ 1. Upload     wrap the first selected file as the `file` part
//!  ├─ 2. Request    POST to the endpoint (no retry, no timeout)
//!  ├─ 3. Response   status → JSON → `error` key → six fields
//!  ├─ 4. Normalize  optional per-field cleanup
//!  └─ 5. View       fill six outputs, reveal the result panel, or alert
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_fields::{extract_file, DocumentField, ExtractionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Defaults to http://127.0.0.1:8000/extract-fields
//!     let config = ExtractionConfig::default();
//!     let fields = extract_file("invoice.pdf", &config).await?;
//!     println!("{}", fields.get(DocumentField::DocumentNumber));
//!     Ok(())
//! }
//! ```
//!
//! ## Failure kinds
//!
//! | Kind | Cause | User message |
//! |------|-------|--------------|
//! | Transport | non-2xx status, network error | `Failed to extract fields from the document.` |
//! | Application | 2xx with an `error` key | `Error: <service text>` |
//! | Unexpected | malformed body, unreadable file | `An error occurred while processing the document.` |
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `extract-fields` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod controller;
pub mod error;
pub mod extract;
pub mod fields;
pub mod notify;
pub mod pipeline;
pub mod view;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder, SubmissionOrdering, DEFAULT_ENDPOINT};
pub use controller::{ExtractionController, SubmissionOutcome};
pub use error::{
    ExtractError, FailureKind, TRANSPORT_FAILURE_MESSAGE, UNEXPECTED_FAILURE_MESSAGE,
};
pub use extract::{extract, extract_bytes, extract_file, extract_sync, extract_with_client};
pub use fields::{DocumentField, ExtractedFields};
pub use notify::{NoopNotifier, Notifier, SharedNotifier};
pub use pipeline::upload::{UploadFile, FILE_FIELD};
pub use view::{ExtractionView, FileInput, OutputSlots, ResultPanel, SubmitEvent};
