use crate::types::{EmailId, Yen};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("Transaction amount must be positive for email [{email_id}], got [{amount}]")]
    NonPositiveAmount {
        email_id: EmailId,
        amount: Yen
    },
    #[error("Required field [{field}] is missing for email [{email_id}]")]
    MissingField {
        email_id: EmailId,
        field: &'static str
    },
    #[error("Field [{field}] has an unreadable value [{value}] for email [{email_id}]")]
    InvalidField {
        email_id: EmailId,
        field: &'static str,
        value: String
    }
}

impl TransactionError {
    pub fn non_positive_amount(email_id: &str, amount: Yen) -> Self {
        Self::NonPositiveAmount {
            email_id: email_id.to_string(),
            amount
        }
    }

    pub fn missing_field(email_id: &str, field: &'static str) -> Self {
        Self::MissingField {
            email_id: email_id.to_string(),
            field
        }
    }

    pub fn invalid_field(email_id: &str, field: &'static str, value: &str) -> Self {
        Self::InvalidField {
            email_id: email_id.to_string(),
            field,
            value: value.to_string()
        }
    }
}
