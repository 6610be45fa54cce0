//! Cryptographic primitives for the transport envelope
//!
//! AES-256-GCM sealing with a pre-shared 32-byte key, optionally derived
//! from a passphrase with Argon2id.

pub mod cipher;
pub mod key;
pub mod key_derivation;
pub mod secret;

pub use cipher::{open_bytes, seal_bytes, FORMAT_VERSION};
pub use key::{EnvelopeKey, KEY_SIZE};
pub use key_derivation::{derive_key, KeyDerivationParams};
pub use secret::SecureString;
