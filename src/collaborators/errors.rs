use crate::types::TransactionId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("Notification failed for transaction [{transaction_id}]: {message}")]
    Notification {
        transaction_id: TransactionId,
        message: String
    },
    #[error("Ledger registration failed for transaction [{transaction_id}]: {message}")]
    Registration {
        transaction_id: TransactionId,
        message: String
    }
}
