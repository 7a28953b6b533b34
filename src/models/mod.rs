mod errors;
mod status;
mod transaction;

pub use errors::TransactionError;
pub use status::{StatusChange, TransactionStatus};
pub use transaction::Transaction;
