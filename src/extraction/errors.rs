use std::string::FromUtf8Error;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Pattern for template [{template}] is unusable: {source}")]
    Pattern {
        template: &'static str,
        #[source]
        source: regex::Error
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Message body is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Message body is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error)
}
