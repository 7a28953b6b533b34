use std::sync::Mutex;

use crate::collaborators::{CollaboratorError, Ledger, Notifier};
use crate::models::Transaction;
use crate::types::EmailId;

/// Remembers which emails it was asked about and optionally fails every call.
#[derive(Default)]
pub struct Recorder {
    calls: Mutex<Vec<EmailId>>,
    failure: Option<String>
}

impl Recorder {
    pub fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(message.to_string())
        }
    }

    pub fn calls(&self) -> Vec<EmailId> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, transaction: &Transaction) -> Option<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(transaction.email_id().to_string());
        }
        self.failure.clone()
    }
}

impl Notifier for Recorder {
    fn notify(&self, transaction: &Transaction) -> Result<(), CollaboratorError> {
        match self.record(transaction) {
            Some(message) => Err(CollaboratorError::Notification { transaction_id: transaction.id(), message }),
            None => Ok(())
        }
    }
}

impl Ledger for Recorder {
    fn register(&self, transaction: &Transaction) -> Result<(), CollaboratorError> {
        match self.record(transaction) {
            Some(message) => Err(CollaboratorError::Registration { transaction_id: transaction.id(), message }),
            None => Ok(())
        }
    }
}
