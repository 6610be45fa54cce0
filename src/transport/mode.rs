//! Body modes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EnvelopeError;

/// How a single body travels over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    /// Wrapped as `{ "data": "<ciphertext>" }`
    #[default]
    Encrypted,
    /// Sent as the JSON payload itself
    Plaintext,
}

impl BodyMode {
    pub fn is_encrypted(self) -> bool {
        matches!(self, Self::Encrypted)
    }
}

impl fmt::Display for BodyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encrypted => write!(f, "encrypted"),
            Self::Plaintext => write!(f, "plaintext"),
        }
    }
}

impl FromStr for BodyMode {
    type Err = EnvelopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "encrypted" | "enc" => Ok(Self::Encrypted),
            "plaintext" | "plain" => Ok(Self::Plaintext),
            other => Err(EnvelopeError::Validation(format!(
                "Unknown body mode '{}' (expected 'encrypted' or 'plaintext')",
                other
            ))),
        }
    }
}

/// Modes for both directions of one endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EndpointModes {
    #[serde(default)]
    pub request: BodyMode,
    #[serde(default)]
    pub response: BodyMode,
}

impl EndpointModes {
    pub fn new(request: BodyMode, response: BodyMode) -> Self {
        Self { request, response }
    }

    pub fn encrypted() -> Self {
        Self::new(BodyMode::Encrypted, BodyMode::Encrypted)
    }

    pub fn plaintext() -> Self {
        Self::new(BodyMode::Plaintext, BodyMode::Plaintext)
    }
}
