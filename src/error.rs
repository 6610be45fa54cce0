//! Error types for api-envelope
//!
//! A single error hierarchy built with thiserror. Encryption and decryption
//! failures are terminal for the call in progress.

use thiserror::Error;

/// The main error type for envelope operations
#[derive(Error, Debug)]
pub enum EnvelopeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors outside the cipher path
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user-supplied values
    #[error("Validation error: {0}")]
    Validation(String),

    /// Cannot produce ciphertext: unserializable payload, missing or malformed key
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Cannot recover plaintext: bad key, corrupted payload, non-JSON result
    #[error("Decryption error: {0}")]
    Decryption(String),

    /// The server answered with a non-success application status
    #[error("API error (status {status}): {message}")]
    Api { status: i64, message: String },
}

impl EnvelopeError {
    /// Create an API error, falling back to a generic message
    pub fn api(status: i64, message: Option<String>) -> Self {
        Self::Api {
            status,
            message: message.unwrap_or_else(|| "request failed".to_string()),
        }
    }

    /// Check if this is an encryption error
    pub fn is_encryption(&self) -> bool {
        matches!(self, Self::Encryption(_))
    }

    /// Check if this is a decryption error
    pub fn is_decryption(&self) -> bool {
        matches!(self, Self::Decryption(_))
    }

    /// Check if this is an application-level API failure
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}

impl From<std::io::Error> for EnvelopeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EnvelopeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for envelope operations
pub type EnvelopeResult<T> = Result<T, EnvelopeError>;
