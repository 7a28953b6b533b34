mod dry_run_ledger;
mod errors;
mod log_notifier;
#[cfg(test)]
pub mod testing;
#[cfg(test)]
mod tests;

use crate::models::Transaction;

pub use dry_run_ledger::DryRunLedger;
pub use errors::CollaboratorError;
pub use log_notifier::LogNotifier;

/// Alerts a human that a transaction is waiting for a decision.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, transaction: &Transaction) -> Result<(), CollaboratorError>;
}

/// Writes an approved transaction into the external household ledger.
pub trait Ledger: Send + Sync + 'static {
    fn register(&self, transaction: &Transaction) -> Result<(), CollaboratorError>;
}
