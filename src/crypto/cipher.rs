//! AES-256-GCM sealing of raw bytes
//!
//! Ciphertext strings are standard base64 of
//! `version (1) || nonce (12) || ciphertext+tag`. The version byte is bound
//! as associated data. Every call draws a fresh random nonce, so sealing
//! the same plaintext twice yields different strings.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng, Payload},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{EnvelopeError, EnvelopeResult};

use super::key::EnvelopeKey;

/// Current wire format version
pub const FORMAT_VERSION: u8 = 1;

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;

const HEADER_SIZE: usize = 1 + NONCE_SIZE;

/// Encrypt bytes and encode them as a transport-safe string
pub fn seal_bytes(plaintext: &[u8], key: &EnvelopeKey) -> EnvelopeResult<String> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| EnvelopeError::Encryption(format!("Failed to create cipher: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let aad = [FORMAT_VERSION];
    let ciphertext = cipher
        .encrypt(
            nonce,
            Payload {
                msg: plaintext,
                aad: &aad,
            },
        )
        .map_err(|e| EnvelopeError::Encryption(format!("Encryption failed: {}", e)))?;

    let mut framed = Vec::with_capacity(HEADER_SIZE + ciphertext.len());
    framed.push(FORMAT_VERSION);
    framed.extend_from_slice(&nonce_bytes);
    framed.extend_from_slice(&ciphertext);

    Ok(STANDARD.encode(framed))
}

/// Decode and decrypt a ciphertext string produced by [`seal_bytes`]
pub fn open_bytes(ciphertext: &str, key: &EnvelopeKey) -> EnvelopeResult<Vec<u8>> {
    let framed = STANDARD
        .decode(ciphertext.trim())
        .map_err(|e| EnvelopeError::Decryption(format!("Invalid ciphertext encoding: {}", e)))?;

    if framed.len() < HEADER_SIZE + TAG_SIZE {
        return Err(EnvelopeError::Decryption(format!(
            "Ciphertext too short: {} bytes",
            framed.len()
        )));
    }

    let version = framed[0];
    if version != FORMAT_VERSION {
        return Err(EnvelopeError::Decryption(format!(
            "Unsupported envelope version: {}",
            version
        )));
    }

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| EnvelopeError::Decryption(format!("Failed to create cipher: {}", e)))?;

    let nonce = Nonce::from_slice(&framed[1..HEADER_SIZE]);
    let aad = [version];

    cipher
        .decrypt(
            nonce,
            Payload {
                msg: &framed[HEADER_SIZE..],
                aad: &aad,
            },
        )
        .map_err(|_| {
            EnvelopeError::Decryption("Decryption failed: invalid key or corrupted data".to_string())
        })
}
