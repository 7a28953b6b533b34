use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::collaborators::{Ledger, Notifier};
use crate::config::Settings;
use crate::extraction::{ExtractionError, Extractor};
use crate::models::{StatusChange, Transaction, TransactionError, TransactionStatus};
use crate::storage::Storage;

/// What happened to a single email.
#[derive(Debug)]
pub enum Outcome {
    /// No known label was found, so this is not a payment notification.
    NotMatched,
    /// The email was processed by an earlier run.
    Duplicate,
    /// Labels were found but a transaction could not be built from them.
    Rejected(TransactionError),
    Notified(Transaction),
    /// Built and stored, but the notification could not be delivered.
    Failed(Transaction)
}

/// Sequences extraction, construction, notification and the later human decision.
///
/// Only this type moves a transaction between statuses, and it refuses moves
/// that the status table does not allow.
pub struct Pipeline {
    extractor: Extractor,
    settings: Settings,
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
    ledger: Arc<dyn Ledger>
}

impl Pipeline {
    pub fn new(settings: Settings, storage: Arc<dyn Storage>, notifier: Arc<dyn Notifier>, ledger: Arc<dyn Ledger>) -> Self {
        Self {
            extractor: Extractor::default(),
            settings,
            storage,
            notifier,
            ledger
        }
    }

    #[cfg(test)]
    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Turns one decoded email body into a stored, notified transaction.
    ///
    /// # Errors
    /// Returns `ExtractionError` only when the matching engine itself fails.
    /// Every other problem is reported through `Outcome`.
    pub fn process_email(&self, email_id: &str, body: &str) -> Result<Outcome, ExtractionError> {
        let fields = self.extractor.extract(body)?;

        if fields.is_empty() {
            debug!("Email [{email_id}] is not a payment notification");
            return Ok(Outcome::NotMatched);
        }

        let mut transaction = match Transaction::from_fields(email_id, &fields, self.settings.utc_offset) {
            Ok(transaction) => transaction,
            Err(error) => {
                warn!("{error}");
                return Ok(Outcome::Rejected(error));
            }
        };

        if !self.storage.insert_new(transaction.clone()) {
            debug!("Email [{email_id}] was already processed");
            return Ok(Outcome::Duplicate);
        }

        let delivered = match self.notifier.notify(&transaction) {
            Ok(()) => {
                self.transition(&mut transaction, TransactionStatus::Notified, None);
                true
            }
            Err(error) => {
                self.transition(&mut transaction, TransactionStatus::Failed, Some(error.to_string()));
                false
            }
        };

        self.storage.save(transaction.clone());

        Ok(if delivered { Outcome::Notified(transaction) } else { Outcome::Failed(transaction) })
    }

    /// Applies a human reaction to a notified transaction. Approval registers it in the ledger right away.
    ///
    /// Reactions on completed transactions, unknown reactions and reactions that
    /// arrive before the notification are ignored.
    pub fn apply_reaction(&self, transaction: &mut Transaction, reaction: &str) -> Vec<StatusChange> {
        if transaction.is_completed() {
            warn!("Ignoring reaction [{reaction}] on completed transaction [{}]", transaction.id());
            return Vec::new();
        }

        let Some(decision) = self.settings.reaction_decision(reaction) else {
            debug!("Ignoring unrelated reaction [{reaction}] on transaction [{}]", transaction.id());
            return Vec::new();
        };

        let Some(change) = self.transition(transaction, decision, None) else {
            return Vec::new();
        };

        let mut changes = vec![change];

        if decision == TransactionStatus::Approved {
            changes.extend(self.register(transaction));
        }

        changes
    }

    fn register(&self, transaction: &mut Transaction) -> Option<StatusChange> {
        match self.ledger.register(transaction) {
            Ok(()) => self.transition(transaction, TransactionStatus::Registered, None),
            Err(error) => self.transition(transaction, TransactionStatus::Failed, Some(error.to_string()))
        }
    }

    fn transition(&self, transaction: &mut Transaction, next: TransactionStatus, error_message: Option<String>) -> Option<StatusChange> {
        let current = transaction.status();

        if !current.can_transition_to(next) {
            warn!("Refusing transition [{current}] -> [{next}] for transaction [{}]", transaction.id());
            return None;
        }

        let change = transaction.update_status(next, error_message);

        match &change.error_message {
            Some(error) => warn!("Transaction [{}]: [{}] -> [{}] | {error}", change.transaction_id, change.from, change.to),
            None => info!("Transaction [{}]: [{}] -> [{}]", change.transaction_id, change.from, change.to)
        }

        Some(change)
    }
}
