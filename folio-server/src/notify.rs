//! Contact-message notification collaborator.
//!
//! Submissions are persisted first; notification is strictly
//! best-effort and a failure here never fails the write.

use folio_model::ContactMessage;
use thiserror::Error;
use tracing::info;

/// Notification delivery failure.
#[derive(Debug, Error)]
#[error("notification failed: {0}")]
pub struct NotifyError(pub String);

/// Delivers a heads-up about a new contact message.
pub trait Notifier: Send + Sync {
    fn contact_received(&self, message: &ContactMessage) -> Result<(), NotifyError>;
}

/// Default notifier: records the submission in the log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn contact_received(&self, message: &ContactMessage) -> Result<(), NotifyError> {
        info!(
            name = %message.name,
            email = %message.email,
            "new contact message"
        );
        Ok(())
    }
}
