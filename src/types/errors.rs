use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum YenError {
    #[error("Yen error: {0}")]
    InvalidFormat(String),
    #[error("Yen error: {0}")]
    ParseInt(#[from] ParseIntError)
}
