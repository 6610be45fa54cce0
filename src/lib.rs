//! api-envelope - encrypted JSON transport for the admin back-office API
//!
//! Request and response bodies travel as `{ "data": "<ciphertext>" }`, where
//! the ciphertext is AES-256-GCM over the JSON payload under a pre-shared
//! key. Some endpoints send plaintext JSON instead; that choice is explicit
//! per endpoint.
//!
//! # Architecture
//!
//! - `crypto`: key handling, Argon2id derivation, AES-256-GCM sealing
//! - `envelope`: JSON encrypt/decrypt and the `{ data }` wrapper
//! - `transport`: body modes, endpoint policy, the status convention
//! - `config`: paths and settings
//! - `error`: error types
//!
//! # Example
//!
//! ```rust
//! use api_envelope::{crypto::EnvelopeKey, envelope};
//! use serde_json::json;
//!
//! let key = EnvelopeKey::generate();
//! let payload = json!({"status": 200, "data": [{"id": 1, "title": "Banner A"}]});
//!
//! let ciphertext = envelope::encrypt(&payload, &key)?;
//! assert_eq!(envelope::decrypt(&ciphertext, &key)?, payload);
//! # Ok::<(), api_envelope::EnvelopeError>(())
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod envelope;
pub mod error;
pub mod transport;

pub use envelope::{decrypt, decrypt_as, encrypt, Envelope, EnvelopeCodec};
pub use error::{EnvelopeError, EnvelopeResult};
