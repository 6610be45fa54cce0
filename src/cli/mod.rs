//! CLI command handlers
//!
//! Bridges the clap argument parsing with the envelope and config layers.

pub mod codec;
pub mod endpoint;
pub mod key;

pub use codec::{handle_decrypt_command, handle_encrypt_command, DecryptArgs, EncryptArgs};
pub use endpoint::{handle_endpoint_command, EndpointCommands};
pub use key::{handle_key_command, load_key, KeyCommands};
