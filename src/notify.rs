//! Notification seam for submission events.
//!
//! A browser would pop a blocking alert on failure. Headless callers inject an
//! [`Arc<dyn Notifier>`] into [`crate::controller::ExtractionController`]
//! instead and decide for themselves how to show the message: print it,
//! forward it to a UI thread, or record it in a test.
//!
//! # Example
//!
//! ```rust
//! use edgequake_fields::Notifier;
//! use std::sync::Mutex;
//!
//! #[derive(Default)]
//! struct Collecting {
//!     alerts: Mutex<Vec<String>>,
//! }
//!
//! impl Notifier for Collecting {
//!     fn alert(&self, message: &str) {
//!         self.alerts.lock().unwrap().push(message.to_string());
//!     }
//! }
//! ```

use crate::fields::ExtractedFields;
use std::sync::Arc;

/// Receives the events of each submission.
///
/// Implementations must be `Send + Sync`: several submissions can be in
/// flight at once and call in from different tasks. All methods default to
/// no-ops so callers only override what they care about.
pub trait Notifier: Send + Sync {
    /// The request for submission `ticket` is about to be sent.
    fn on_request_start(&self, ticket: u64, endpoint: &str) {
        let _ = (ticket, endpoint);
    }

    /// The view was filled from a successful response.
    fn on_fields_populated(&self, ticket: u64, fields: &ExtractedFields) {
        let _ = (ticket, fields);
    }

    /// A response arrived after a newer submission started and was dropped.
    fn on_superseded(&self, ticket: u64) {
        let _ = ticket;
    }

    /// A submission failed; `message` is the text the user should see.
    fn alert(&self, message: &str) {
        let _ = message;
    }
}

/// A no-op implementation for callers that read the returned outcome instead.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {}

/// Convenience alias for the type stored in the controller.
pub type SharedNotifier = Arc<dyn Notifier>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::DocumentField;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Tracking {
        started: AtomicUsize,
        populated: AtomicUsize,
        alerts: Mutex<Vec<String>>,
    }

    impl Notifier for Tracking {
        fn on_request_start(&self, _ticket: u64, _endpoint: &str) {
            self.started.fetch_add(1, Ordering::SeqCst);
        }

        fn on_fields_populated(&self, _ticket: u64, _fields: &ExtractedFields) {
            self.populated.fetch_add(1, Ordering::SeqCst);
        }

        fn alert(&self, message: &str) {
            self.alerts.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn noop_notifier_accepts_every_event() {
        let n: SharedNotifier = Arc::new(NoopNotifier);
        n.on_request_start(1, "http://127.0.0.1:8000/extract-fields");
        n.on_fields_populated(1, &ExtractedFields::new());
        n.on_superseded(1);
        n.alert("Error: bad file");
    }

    #[test]
    fn overridden_methods_are_called() {
        let t = Arc::new(Tracking::default());
        let n: SharedNotifier = t.clone();

        n.on_request_start(1, "http://localhost");
        n.on_fields_populated(
            1,
            &ExtractedFields::new().with(DocumentField::DocumentCurrency, "INR"),
        );
        n.on_superseded(2);
        n.alert("Failed to extract fields from the document.");

        assert_eq!(t.started.load(Ordering::SeqCst), 1);
        assert_eq!(t.populated.load(Ordering::SeqCst), 1);
        assert_eq!(
            t.alerts.lock().unwrap().as_slice(),
            ["Failed to extract fields from the document."]
        );
    }

    #[test]
    fn notifier_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn Notifier>();
        assert_send_sync::<NoopNotifier>();
    }
}
