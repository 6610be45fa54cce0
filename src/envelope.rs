//! The encrypted transport envelope
//!
//! Outbound: serialize to JSON, seal, base64. Inbound: base64-decode, open,
//! parse JSON. Each call is independent; the only input besides the payload
//! is a read-only key.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::crypto::{open_bytes, seal_bytes, EnvelopeKey};
use crate::error::{EnvelopeError, EnvelopeResult};

/// Encrypt any serializable value into a ciphertext string
///
/// # Errors
///
/// Returns [`EnvelopeError::Encryption`] when the value cannot be serialized
/// to JSON (for example a map with non-string keys).
pub fn encrypt<T>(plaintext: &T, key: &EnvelopeKey) -> EnvelopeResult<String>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_vec(plaintext)
        .map_err(|e| EnvelopeError::Encryption(format!("Failed to serialize payload: {}", e)))?;

    let ciphertext = seal_bytes(&json, key)?;
    tracing::debug!(
        plaintext_len = json.len(),
        ciphertext_len = ciphertext.len(),
        "payload sealed"
    );
    Ok(ciphertext)
}

/// Decrypt a ciphertext string back into a JSON value
///
/// # Errors
///
/// Returns [`EnvelopeError::Decryption`] when the ciphertext is malformed,
/// the key does not match, or the plaintext is not UTF-8 JSON.
pub fn decrypt(ciphertext: &str, key: &EnvelopeKey) -> EnvelopeResult<Value> {
    let bytes = open_bytes(ciphertext, key).map_err(|e| {
        tracing::warn!(ciphertext_len = ciphertext.len(), "failed to open envelope");
        e
    })?;

    let text = std::str::from_utf8(&bytes).map_err(|e| {
        EnvelopeError::Decryption(format!("Invalid UTF-8 in decrypted data: {}", e))
    })?;

    let value = serde_json::from_str(text)
        .map_err(|e| EnvelopeError::Decryption(format!("Decrypted data is not JSON: {}", e)))?;

    tracing::debug!(plaintext_len = bytes.len(), "payload opened");
    Ok(value)
}

/// Decrypt a ciphertext string into a typed value
///
/// Decryption failures are [`EnvelopeError::Decryption`]; valid JSON of the
/// wrong shape is [`EnvelopeError::Json`].
pub fn decrypt_as<T: DeserializeOwned>(ciphertext: &str, key: &EnvelopeKey) -> EnvelopeResult<T> {
    let value = decrypt(ciphertext, key)?;
    serde_json::from_value(value).map_err(|e| {
        EnvelopeError::Json(format!("Decrypted payload has unexpected shape: {}", e))
    })
}

/// The `{ "data": "<ciphertext>" }` wrapper used for requests and responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub data: String,
}

impl Envelope {
    /// Encrypt a payload and wrap it
    pub fn seal<T: Serialize + ?Sized>(payload: &T, key: &EnvelopeKey) -> EnvelopeResult<Self> {
        Ok(Self {
            data: encrypt(payload, key)?,
        })
    }

    /// Decrypt the wrapped ciphertext
    pub fn open(&self, key: &EnvelopeKey) -> EnvelopeResult<Value> {
        decrypt(&self.data, key)
    }

    /// Parse an HTTP body as an envelope
    ///
    /// A body that is not `{ "data": <string> }` cannot be opened, so it is
    /// reported as a decryption failure.
    pub fn from_json(body: &str) -> EnvelopeResult<Self> {
        serde_json::from_str(body)
            .map_err(|e| EnvelopeError::Decryption(format!("Malformed envelope: {}", e)))
    }

    /// Parse an already-decoded JSON body as an envelope
    pub fn from_value(body: Value) -> EnvelopeResult<Self> {
        serde_json::from_value(body)
            .map_err(|e| EnvelopeError::Decryption(format!("Malformed envelope: {}", e)))
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({ "data": self.data })
    }
}

/// Envelope operations bound to one explicitly constructed key
///
/// Hold one per backend and share it across calls; it carries no mutable
/// state.
#[derive(Debug, Clone)]
pub struct EnvelopeCodec {
    key: EnvelopeKey,
}

impl EnvelopeCodec {
    pub fn new(key: EnvelopeKey) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &EnvelopeKey {
        &self.key
    }

    pub fn encrypt<T: Serialize + ?Sized>(&self, plaintext: &T) -> EnvelopeResult<String> {
        encrypt(plaintext, &self.key)
    }

    pub fn decrypt(&self, ciphertext: &str) -> EnvelopeResult<Value> {
        decrypt(ciphertext, &self.key)
    }

    pub fn decrypt_as<T: DeserializeOwned>(&self, ciphertext: &str) -> EnvelopeResult<T> {
        decrypt_as(ciphertext, &self.key)
    }

    pub fn seal<T: Serialize + ?Sized>(&self, payload: &T) -> EnvelopeResult<Envelope> {
        Envelope::seal(payload, &self.key)
    }

    pub fn open(&self, envelope: &Envelope) -> EnvelopeResult<Value> {
        envelope.open(&self.key)
    }
}
