//! SHAREBLOOM - Custom Error Types
//! Defines the error hierarchy for the shared Bloom filter.

use thiserror::Error;

/// Custom Result type for the filter and its stores.
pub type Result<T> = std::result::Result<T, BloomError>;

/// Error types for the shared Bloom filter.
#[derive(Error, Debug)]
pub enum BloomError {
    /// Bad sizing input (item count, false-positive rate) at construction.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Any failure reaching or operating on the bit store.
    #[error("Bit store unavailable: {0}")]
    StoreUnavailable(String),

    /// Malformed configuration file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (config file, interactive shell).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BloomError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        BloomError::InvalidParameter(msg.into())
    }

    pub(crate) fn store(msg: impl Into<String>) -> Self {
        BloomError::StoreUnavailable(msg.into())
    }

    /// Returns true for errors raised by the bit store.
    pub fn is_store_error(&self) -> bool {
        matches!(self, BloomError::StoreUnavailable(_))
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for BloomError {
    fn from(err: redis::RedisError) -> Self {
        BloomError::StoreUnavailable(err.to_string())
    }
}
