use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::types::TransactionId;

/// Lifecycle of a detected transaction.
///
/// `Pending -> Notified -> Approved | Skipped`, `Approved -> Registered`, and
/// `Failed` from any state that is not yet terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Detected in the mailbox, nobody has been told yet.
    Pending,
    /// A human has been asked to approve or skip it.
    Notified,
    Approved,
    Skipped,
    /// The ledger confirmed the entry was written.
    Registered,
    Failed
}

impl TransactionStatus {
    #[cfg(test)]
    pub const ALL: [TransactionStatus; 6] = [
        TransactionStatus::Pending,
        TransactionStatus::Notified,
        TransactionStatus::Approved,
        TransactionStatus::Skipped,
        TransactionStatus::Registered,
        TransactionStatus::Failed
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Notified => "notified",
            TransactionStatus::Approved => "approved",
            TransactionStatus::Skipped => "skipped",
            TransactionStatus::Registered => "registered",
            TransactionStatus::Failed => "failed"
        }
    }

    /// No transitions leave a terminal status. Nothing re-opens a skipped or failed transaction.
    pub fn is_terminal(&self) -> bool {
        match self {
            TransactionStatus::Skipped | TransactionStatus::Registered | TransactionStatus::Failed => true,
            TransactionStatus::Pending | TransactionStatus::Notified | TransactionStatus::Approved => false
        }
    }

    /// The legal next statuses. `Transaction::update_status` does not consult this table,
    /// callers that want enforcement check `can_transition_to` first.
    pub fn allowed_transitions(&self) -> &'static [TransactionStatus] {
        match self {
            TransactionStatus::Pending => &[TransactionStatus::Notified, TransactionStatus::Failed],
            TransactionStatus::Notified => &[
                TransactionStatus::Approved,
                TransactionStatus::Skipped,
                TransactionStatus::Failed
            ],
            TransactionStatus::Approved => &[TransactionStatus::Registered, TransactionStatus::Failed],
            TransactionStatus::Skipped | TransactionStatus::Registered | TransactionStatus::Failed => &[]
        }
    }

    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Emitted by every status mutation, for audit and logging collaborators.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StatusChange {
    pub transaction_id: TransactionId,
    pub from: TransactionStatus,
    pub to: TransactionStatus,
    pub error_message: Option<String>
}
