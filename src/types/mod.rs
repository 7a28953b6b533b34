mod errors;
mod yen;

pub use errors::YenError;
pub use yen::Yen;

pub type TransactionId = uuid::Uuid;
pub type EmailId = String;
