//! Key management commands

use clap::Subcommand;

use crate::config::{AppPaths, KeySource, Settings};
use crate::crypto::{derive_key, EnvelopeKey, KeyDerivationParams, SecureString};
use crate::error::{EnvelopeError, EnvelopeResult};

/// Minimum passphrase length accepted by `key derive`
const MIN_PASSPHRASE_LEN: usize = 8;

/// Key management commands
#[derive(Subcommand, Debug)]
pub enum KeyCommands {
    /// Generate a random 256-bit key and print it as base64
    Generate {
        /// Store the key in the settings file
        #[arg(long)]
        save: bool,
    },

    /// Derive a key from a passphrase with Argon2id
    Derive {
        /// Shared salt (B64, no padding); random if omitted
        #[arg(long)]
        salt: Option<String>,

        /// Store the derivation parameters in the settings file
        #[arg(long)]
        save: bool,
    },

    /// Show which key source is configured
    Status,
}

/// Handle key commands
pub fn handle_key_command(
    paths: &AppPaths,
    settings: &mut Settings,
    cmd: KeyCommands,
) -> EnvelopeResult<()> {
    match cmd {
        KeyCommands::Generate { save } => generate(paths, settings, save),
        KeyCommands::Derive { salt, save } => derive(paths, settings, salt, save),
        KeyCommands::Status => show_status(settings),
    }
}

fn generate(paths: &AppPaths, settings: &mut Settings, save: bool) -> EnvelopeResult<()> {
    let key = EnvelopeKey::generate();
    println!("{}", key.to_base64());

    if save {
        settings.key.key = Some(key.to_base64());
        settings.key.key_params = None;
        settings.save(paths)?;
        eprintln!("Key saved to {}", paths.settings_file().display());
    }

    Ok(())
}

fn derive(
    paths: &AppPaths,
    settings: &mut Settings,
    salt: Option<String>,
    save: bool,
) -> EnvelopeResult<()> {
    let params = match salt {
        Some(salt) => KeyDerivationParams {
            salt,
            ..Default::default()
        },
        None => KeyDerivationParams::new(),
    };

    let passphrase = prompt_new_passphrase()?;
    eprintln!("Deriving key...");
    let key = derive_key(&passphrase, &params)?;

    println!("{}", key.to_base64());
    eprintln!(
        "Parameters: salt={} memory_cost={} time_cost={} parallelism={}",
        params.salt, params.memory_cost, params.time_cost, params.parallelism
    );

    if save {
        settings.key.key = None;
        settings.key.key_params = Some(params);
        settings.save(paths)?;
        eprintln!(
            "Derivation parameters saved; supply the passphrase via {}",
            settings.key.passphrase_env
        );
    }

    Ok(())
}

fn show_status(settings: &Settings) -> EnvelopeResult<()> {
    println!("Key Status");
    println!("==========");

    match settings.key.source_with(|var| std::env::var(var).ok()) {
        Some(source) => {
            println!("Source: {}", source);
            match settings.key.resolve() {
                Ok(_) => println!("Key:    valid"),
                Err(e) => println!("Key:    INVALID ({})", e),
            }
        }
        None if settings.key.key_params.is_some() => {
            println!("Source: passphrase (prompted, {} not set)", settings.key.passphrase_env);
        }
        None => {
            println!("Source: none");
            println!();
            println!("Set {} or run 'api-envelope key generate --save'.", settings.key.key_env);
        }
    }

    if let Some(ref params) = settings.key.key_params {
        println!();
        println!("Key Derivation Parameters:");
        println!("  Algorithm:   Argon2id");
        println!("  Memory Cost: {} KiB", params.memory_cost);
        println!("  Time Cost:   {} iterations", params.time_cost);
        println!("  Parallelism: {} threads", params.parallelism);
    }

    Ok(())
}

/// Resolve the envelope key, prompting for a passphrase when the settings
/// call for a derived key and none is in the environment
pub fn load_key(settings: &Settings) -> EnvelopeResult<EnvelopeKey> {
    let lookup = |var: &str| std::env::var(var).ok();

    if settings.key.source_with(lookup).is_none() && settings.key.key_params.is_some() {
        let passphrase = prompt_passphrase("Envelope passphrase: ")?;
        return settings.key.derive(&passphrase);
    }

    settings.key.resolve_with(lookup)
}

fn prompt_new_passphrase() -> EnvelopeResult<SecureString> {
    loop {
        let pass1 = prompt_passphrase("Enter passphrase: ")?;

        if pass1.len() < MIN_PASSPHRASE_LEN {
            eprintln!(
                "Passphrase must be at least {} characters. Please try again.",
                MIN_PASSPHRASE_LEN
            );
            continue;
        }

        let pass2 = prompt_passphrase("Confirm passphrase: ")?;

        if pass1.as_str() != pass2.as_str() {
            eprintln!("Passphrases do not match. Please try again.");
            continue;
        }

        return Ok(pass1);
    }
}

fn prompt_passphrase(prompt: &str) -> EnvelopeResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::from)
        .map_err(|e| EnvelopeError::Encryption(format!("Failed to read passphrase: {}", e)))
}
