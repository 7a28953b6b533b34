use tracing::info;

use crate::collaborators::{CollaboratorError, Ledger};
use crate::models::Transaction;

/// Accepts every registration without contacting a ledger.
pub struct DryRunLedger;

impl Ledger for DryRunLedger {
    fn register(&self, transaction: &Transaction) -> Result<(), CollaboratorError> {
        info!(
            "Dry run: would register [{}] {} at {} on {}",
            transaction.id(),
            transaction.formatted_amount(),
            transaction.store(),
            transaction.transaction_date().format("%Y-%m-%d")
        );
        Ok(())
    }
}
