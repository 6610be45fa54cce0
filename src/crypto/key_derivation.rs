//! Passphrase key derivation using Argon2id
//!
//! Lets both sides of the API agree on an envelope key by sharing a
//! passphrase and a fixed set of derivation parameters instead of raw key
//! bytes. The salt is part of the shared parameters, so derivation is
//! deterministic.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, Params,
};
use serde::{Deserialize, Serialize};

use crate::error::{EnvelopeError, EnvelopeResult};

use super::key::{EnvelopeKey, KEY_SIZE};

/// Parameters for key derivation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDerivationParams {
    /// Salt for key derivation (B64 salt string)
    pub salt: String,
    /// Memory cost in KiB (default: 65536 = 64 MiB)
    pub memory_cost: u32,
    /// Time cost (iterations, default: 3)
    pub time_cost: u32,
    /// Parallelism degree (default: 4)
    pub parallelism: u32,
}

impl Default for KeyDerivationParams {
    fn default() -> Self {
        Self {
            salt: String::new(),
            memory_cost: 65536,
            time_cost: 3,
            parallelism: 4,
        }
    }
}

impl KeyDerivationParams {
    /// Create new params with a random salt
    pub fn new() -> Self {
        let salt = SaltString::generate(&mut OsRng);
        Self {
            salt: salt.to_string(),
            ..Default::default()
        }
    }

    /// Create params with specific values
    pub fn with_values(salt: String, memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            salt,
            memory_cost,
            time_cost,
            parallelism,
        }
    }
}

/// Derive an envelope key from a passphrase
pub fn derive_key(passphrase: &str, params: &KeyDerivationParams) -> EnvelopeResult<EnvelopeKey> {
    if passphrase.is_empty() {
        return Err(EnvelopeError::Encryption("Passphrase is empty".to_string()));
    }

    let salt = SaltString::from_b64(&params.salt)
        .map_err(|e| EnvelopeError::Encryption(format!("Invalid salt: {}", e)))?;

    let argon2_params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        Some(KEY_SIZE),
    )
    .map_err(|e| EnvelopeError::Encryption(format!("Invalid Argon2 parameters: {}", e)))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2_params,
    );

    let hash = argon2
        .hash_password(passphrase.as_bytes(), &salt)
        .map_err(|e| EnvelopeError::Encryption(format!("Key derivation failed: {}", e)))?;

    let output = hash
        .hash
        .ok_or_else(|| EnvelopeError::Encryption("No hash output generated".to_string()))?;

    EnvelopeKey::from_bytes(output.as_bytes())
}
