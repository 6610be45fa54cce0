//! Encrypt and decrypt commands
//!
//! Read a JSON payload or an HTTP body from a file or stdin and print the
//! result on stdout, so the commands compose with curl and jq.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use serde_json::Value;

use crate::config::Settings;
use crate::envelope;
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::transport::{ApiResponse, BodyMode};

use super::key::load_key;

/// Arguments for `encrypt`
#[derive(Args, Debug)]
pub struct EncryptArgs {
    /// JSON file to encrypt (stdin if omitted or "-")
    pub input: Option<PathBuf>,

    /// Endpoint path whose configured request mode applies
    #[arg(short, long, conflicts_with = "mode")]
    pub endpoint: Option<String>,

    /// Body mode, overriding the endpoint policy
    #[arg(short, long)]
    pub mode: Option<BodyMode>,

    /// Print only the ciphertext string instead of the request body
    #[arg(long, conflicts_with_all = ["mode", "endpoint"])]
    pub raw: bool,
}

/// Arguments for `decrypt`
#[derive(Args, Debug)]
pub struct DecryptArgs {
    /// Response body or ciphertext file (stdin if omitted or "-")
    pub input: Option<PathBuf>,

    /// Endpoint path whose configured response mode applies
    #[arg(short, long, conflicts_with = "mode")]
    pub endpoint: Option<String>,

    /// Body mode, overriding the endpoint policy
    #[arg(short, long)]
    pub mode: Option<BodyMode>,

    /// Input is a bare ciphertext string rather than an envelope body
    #[arg(long, conflicts_with_all = ["mode", "endpoint"])]
    pub raw: bool,

    /// Fail unless the decoded body carries status 200
    #[arg(long)]
    pub check_status: bool,
}

/// Handle `encrypt`
pub fn handle_encrypt_command(settings: &Settings, args: EncryptArgs) -> EnvelopeResult<()> {
    let text = read_input(args.input.as_deref())?;
    let payload: Value = serde_json::from_str(&text)
        .map_err(|e| EnvelopeError::Json(format!("Input is not valid JSON: {}", e)))?;

    if args.raw {
        let key = load_key(settings)?;
        println!("{}", envelope::encrypt(&payload, &key)?);
        return Ok(());
    }

    let mode = select_mode(args.mode, args.endpoint.as_deref(), |path| {
        settings.endpoints.modes_for(path).request
    });

    let body = match mode {
        BodyMode::Plaintext => payload,
        BodyMode::Encrypted => settings
            .body_codec(load_key(settings)?)
            .encode_with(mode, &payload)?,
    };

    println!("{}", serde_json::to_string(&body)?);
    Ok(())
}

/// Handle `decrypt`
pub fn handle_decrypt_command(settings: &Settings, args: DecryptArgs) -> EnvelopeResult<()> {
    let text = read_input(args.input.as_deref())?;

    let value = if args.raw {
        let key = load_key(settings)?;
        envelope::decrypt(text.trim(), &key)?
    } else {
        let mode = select_mode(args.mode, args.endpoint.as_deref(), |path| {
            settings.endpoints.modes_for(path).response
        });
        match mode {
            BodyMode::Plaintext => serde_json::from_str(&text)
                .map_err(|e| EnvelopeError::Json(format!("Input is not valid JSON: {}", e)))?,
            BodyMode::Encrypted => settings
                .body_codec(load_key(settings)?)
                .decode_with(mode, &text)?,
        }
    };

    if args.check_status {
        ApiResponse::<Value>::from_value(value.clone())?.into_result()?;
    }

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Explicit mode, then the endpoint's configured mode, then encrypted
fn select_mode<F>(mode: Option<BodyMode>, endpoint: Option<&str>, policy: F) -> BodyMode
where
    F: Fn(&str) -> BodyMode,
{
    match (mode, endpoint) {
        (Some(mode), _) => mode,
        (None, Some(path)) => policy(path),
        (None, None) => BodyMode::Encrypted,
    }
}

fn read_input(path: Option<&Path>) -> EnvelopeResult<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| EnvelopeError::Io(format!("Failed to read {}: {}", path.display(), e))),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| EnvelopeError::Io(format!("Failed to read stdin: {}", e)))?;
            Ok(buffer)
        }
    }
}
