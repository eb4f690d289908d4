//! The form controller: one request/response cycle per submission.
//!
//! ## Submission lifecycle
//!
//! ```text
//! submit ─▶ prevent default ─▶ take ticket ─▶ read first file
//!        ─▶ POST (pending) ─▶ stale? ─▶ apply fields | alert
//! ```
//!
//! Each call to [`ExtractionController::submit`] is independent. Several may
//! be in flight at once; [`SubmissionOrdering`] decides whether a response
//! that resolves after a newer submission started is applied or dropped.

use crate::config::{ExtractionConfig, SubmissionOrdering};
use crate::error::{ExtractError, FailureKind};
use crate::extract::extract_with_client;
use crate::fields::ExtractedFields;
use crate::notify::{NoopNotifier, SharedNotifier};
use crate::pipeline::upload::UploadFile;
use crate::view::{ExtractionView, SubmitEvent, FILE_INPUT_ID, FORM_ID, RESULT_PANEL_ID};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, warn};

/// How a single submission ended.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// The view was filled and the result panel shown.
    Populated(ExtractedFields),
    /// The submission failed; the user was alerted with `error.user_message()`.
    Failed(ExtractError),
    /// A newer submission started before this response arrived; nothing was written.
    Superseded,
}

impl SubmissionOutcome {
    pub fn is_populated(&self) -> bool {
        matches!(self, SubmissionOutcome::Populated(_))
    }

    /// Failure kind, if the submission failed.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            SubmissionOutcome::Failed(e) => Some(e.kind()),
            _ => None,
        }
    }
}

/// Binds an [`ExtractionView`] to the extraction service.
pub struct ExtractionController {
    config: ExtractionConfig,
    client: reqwest::Client,
    view: Arc<Mutex<ExtractionView>>,
    notifier: SharedNotifier,
    latest_ticket: AtomicU64,
}

impl ExtractionController {
    /// Create a controller with no notifier; read the returned outcomes instead.
    pub fn new(
        config: ExtractionConfig,
        view: Arc<Mutex<ExtractionView>>,
    ) -> Result<Self, ExtractError> {
        Self::with_notifier(config, view, Arc::new(NoopNotifier))
    }

    pub fn with_notifier(
        config: ExtractionConfig,
        view: Arc<Mutex<ExtractionView>>,
        notifier: SharedNotifier,
    ) -> Result<Self, ExtractError> {
        let client = config.http_client()?;
        Ok(Self {
            config,
            client,
            view,
            notifier,
            latest_ticket: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Shared handle to the view this controller writes into.
    pub fn view(&self) -> Arc<Mutex<ExtractionView>> {
        Arc::clone(&self.view)
    }

    /// Handle one submission of the upload form.
    ///
    /// The event's default action is prevented before anything else happens.
    /// The first selected file (or nothing) is uploaded; on success the six
    /// outputs are overwritten and the result panel shown. On failure the
    /// notifier's [`alert`](crate::Notifier::alert) receives the user
    /// message and the view is left untouched.
    pub async fn submit(&self, event: &mut SubmitEvent) -> SubmissionOutcome {
        event.prevent_default();
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("#{} submitted (ticket {}); default action prevented", FORM_ID, ticket);

        let upload = match self.selected_file() {
            Ok(upload) => upload,
            Err(e) => return self.fail(ticket, e),
        };

        self.notifier.on_request_start(ticket, &self.config.endpoint);
        let result = extract_with_client(&self.client, upload.as_ref(), &self.config).await;

        match result {
            Ok(fields) => match self.populate(ticket, &fields) {
                Ok(true) => {
                    self.notifier.on_fields_populated(ticket, &fields);
                    SubmissionOutcome::Populated(fields)
                }
                Ok(false) => self.supersede(ticket),
                Err(e) => self.fail(ticket, e),
            },
            Err(_) if self.is_stale(ticket) => self.supersede(ticket),
            Err(e) => self.fail(ticket, e),
        }
    }

    /// The first file of the file input, cloned out so no lock is held
    /// while the request is pending.
    fn selected_file(&self) -> Result<Option<UploadFile>, ExtractError> {
        let view = self.view.lock().map_err(|_| {
            ExtractError::Internal(format!("view lock poisoned reading #{FILE_INPUT_ID}"))
        })?;
        Ok(view.file_input.first().cloned())
    }

    /// Write `fields` into the view unless `ticket` is stale. The staleness
    /// check runs under the view lock so a newer submission cannot write in
    /// between. Returns whether the view was written.
    fn populate(&self, ticket: u64, fields: &ExtractedFields) -> Result<bool, ExtractError> {
        let mut view = self.view.lock().map_err(|_| {
            ExtractError::Internal(format!("view lock poisoned writing #{RESULT_PANEL_ID}"))
        })?;
        if self.is_stale(ticket) {
            return Ok(false);
        }
        view.apply(fields);
        Ok(true)
    }

    fn supersede(&self, ticket: u64) -> SubmissionOutcome {
        debug!(
            "Dropping response for ticket {} (latest is {})",
            ticket,
            self.latest_ticket.load(Ordering::SeqCst)
        );
        self.notifier.on_superseded(ticket);
        SubmissionOutcome::Superseded
    }

    fn is_stale(&self, ticket: u64) -> bool {
        match self.config.ordering {
            SubmissionOrdering::LatestSubmissionWins => {
                self.latest_ticket.load(Ordering::SeqCst) != ticket
            }
            SubmissionOrdering::LastResolvedWins => false,
        }
    }

    fn fail(&self, ticket: u64, e: ExtractError) -> SubmissionOutcome {
        match e.kind() {
            FailureKind::Transport => warn!("Ticket {}: transport failure: {}", ticket, e),
            FailureKind::Application => warn!("Ticket {}: service reported: {}", ticket, e),
            FailureKind::Unexpected => error!("Ticket {}: {}", ticket, e),
        }
        self.notifier.alert(&e.user_message());
        SubmissionOutcome::Failed(e)
    }
}
