use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::extraction::ExtractedFields;
use crate::models::errors::TransactionError;
use crate::models::{StatusChange, TransactionStatus};
use crate::types::{EmailId, TransactionId, Yen};

const NOTIFICATION_HEADER: &str = "*新しい取引が検出されました*";
const NOTIFICATION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

// ANA Pay writes seconds, Rakuten Pay does not, and the separator varies between senders.
const DATE_FORMATS: [&str; 4] = [
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%d %H:%M"
];

/// A payment detected in a notification email, tracked until it reaches a terminal status.
///
/// Construction validates every field, so an instance is always complete. The
/// status only changes through `update_status`, and one writer at a time is
/// assumed per transaction.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    id: TransactionId,
    /// Source message ID, used by storage to drop duplicates.
    email_id: EmailId,
    /// When the payment happened, in the sender's local time.
    transaction_date: DateTime<FixedOffset>,
    amount: Yen,
    store: String,
    status: TransactionStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Only ever set while the status is `Failed`.
    error_message: Option<String>
}

impl Transaction {
    /// Creates a `Pending` transaction.
    ///
    /// # Errors
    /// Returns `TransactionError` if:
    /// - The amount is zero or negative.
    /// - The email ID or the store name is blank.
    pub fn new(email_id: &str, transaction_date: DateTime<FixedOffset>, amount: Yen, store: &str) -> Result<Self, TransactionError> {
        if email_id.trim().is_empty() {
            return Err(TransactionError::missing_field(email_id, "email_id"))
        }

        if store.trim().is_empty() {
            return Err(TransactionError::missing_field(email_id, "store"))
        }

        if !amount.is_positive() {
            return Err(TransactionError::non_positive_amount(email_id, amount))
        }

        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            email_id: email_id.to_string(),
            transaction_date,
            amount,
            store: store.to_string(),
            status: TransactionStatus::Pending,
            created_at: now,
            updated_at: now,
            error_message: None
        })
    }

    /// Builds a transaction from raw extracted text. Dates without an offset are read in `offset`.
    pub fn from_fields(email_id: &str, fields: &ExtractedFields, offset: FixedOffset) -> Result<Self, TransactionError> {
        let raw_date = fields.date.as_deref()
            .ok_or_else(|| TransactionError::missing_field(email_id, "date"))?;
        let raw_amount = fields.amount.as_deref()
            .ok_or_else(|| TransactionError::missing_field(email_id, "amount"))?;
        let store = fields.store.as_deref()
            .ok_or_else(|| TransactionError::missing_field(email_id, "store"))?;

        let transaction_date = parse_local_datetime(raw_date, offset)
            .ok_or_else(|| TransactionError::invalid_field(email_id, "date", raw_date))?;
        let amount = Yen::from_str(raw_amount)
            .map_err(|_| TransactionError::invalid_field(email_id, "amount", raw_amount))?;

        Self::new(email_id, transaction_date, amount, store)
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn email_id(&self) -> &str {
        &self.email_id
    }

    pub fn transaction_date(&self) -> DateTime<FixedOffset> {
        self.transaction_date
    }

    pub fn amount(&self) -> Yen {
        self.amount
    }

    pub fn store(&self) -> &str {
        &self.store
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Sets the status unconditionally and refreshes `updated_at`.
    ///
    /// The error message is kept only for `Failed`; every other status clears it.
    /// Legality is not checked here, see `TransactionStatus::can_transition_to`.
    pub fn update_status(&mut self, status: TransactionStatus, error_message: Option<String>) -> StatusChange {
        let previous = self.status;

        self.status = status;
        self.error_message = match status {
            TransactionStatus::Failed => error_message,
            TransactionStatus::Pending
            | TransactionStatus::Notified
            | TransactionStatus::Approved
            | TransactionStatus::Skipped
            | TransactionStatus::Registered => None
        };
        self.updated_at = Utc::now().max(self.updated_at);

        StatusChange {
            transaction_id: self.id,
            from: previous,
            to: status,
            error_message: self.error_message.clone()
        }
    }

    /// True once the transaction needs no further action.
    pub fn is_completed(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn formatted_amount(&self) -> String {
        self.amount.to_string()
    }

    /// Message body handed to the notification collaborator.
    pub fn to_notification_text(&self) -> String {
        let mut text = format!(
            "{NOTIFICATION_HEADER}\n日時: {}\n金額: {}\n店舗: {}\nステータス: {}",
            self.transaction_date.format(NOTIFICATION_DATE_FORMAT),
            self.formatted_amount(),
            self.store,
            self.status
        );

        if let Some(error) = &self.error_message {
            text.push_str("\nエラー: ");
            text.push_str(error);
        }

        text
    }
}

fn parse_local_datetime(value: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();

    DATE_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .and_then(|naive| offset.from_local_datetime(&naive).single())
}
