use tracing::info;

use crate::collaborators::{CollaboratorError, Notifier};
use crate::models::Transaction;

/// Renders the notification text into the log instead of a chat channel.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, transaction: &Transaction) -> Result<(), CollaboratorError> {
        info!("Notification for email [{}]\n{}", transaction.email_id(), transaction.to_notification_text());
        Ok(())
    }
}
