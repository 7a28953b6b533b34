#[cfg(test)]
mod tests;
mod transaction_storage;

use crate::models::Transaction;

pub use transaction_storage::TransactionStorage;

/// Durable side of a transaction. Records are keyed by source email ID.
pub trait Storage: Send + Sync + 'static {
    /// Stores a newly built transaction. Returns `false` and keeps the existing
    /// record when the email was already processed.
    fn insert_new(&self, transaction: Transaction) -> bool;
    fn load(&self, email_id: &str) -> Option<Transaction>;
    fn save(&self, transaction: Transaction);
}
