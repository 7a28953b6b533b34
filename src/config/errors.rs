use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for [{key}]: {message}")]
    InvalidValue {
        key: &'static str,
        message: String
    }
}

impl ConfigError {
    pub fn invalid_value(key: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            message: message.into()
        }
    }
}
