//! Pre-shared envelope key
//!
//! A 32-byte AES-256 key. Key bytes are zeroized on drop and never appear in
//! `Debug` output.

use std::fmt;

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use base64::{engine::general_purpose::STANDARD, Engine};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{EnvelopeError, EnvelopeResult};

/// Size of an AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// A symmetric key shared between the back-office and the API server
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EnvelopeKey {
    key: [u8; KEY_SIZE],
}

impl EnvelopeKey {
    /// Generate a fresh random key from the OS RNG
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut key);
        Self { key }
    }

    /// Build a key from raw bytes
    ///
    /// # Errors
    ///
    /// Returns an encryption error unless exactly 32 bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> EnvelopeResult<Self> {
        if bytes.len() != KEY_SIZE {
            return Err(EnvelopeError::Encryption(format!(
                "Invalid key length: expected {} bytes, got {}",
                KEY_SIZE,
                bytes.len()
            )));
        }
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(bytes);
        Ok(Self { key })
    }

    /// Parse a standard base64 encoded key
    pub fn from_base64(encoded: &str) -> EnvelopeResult<Self> {
        let bytes = Zeroizing::new(
            STANDARD
                .decode(encoded.trim())
                .map_err(|e| EnvelopeError::Encryption(format!("Invalid key encoding: {}", e)))?,
        );
        Self::from_bytes(&bytes)
    }

    /// Parse a hex encoded key
    pub fn from_hex(encoded: &str) -> EnvelopeResult<Self> {
        let bytes = Zeroizing::new(
            hex::decode(encoded.trim())
                .map_err(|e| EnvelopeError::Encryption(format!("Invalid key encoding: {}", e)))?,
        );
        Self::from_bytes(&bytes)
    }

    /// Export the key as standard base64, for configuration files
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.key)
    }

    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl PartialEq for EnvelopeKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for EnvelopeKey {}

impl fmt::Debug for EnvelopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EnvelopeKey([REDACTED])")
    }
}
