use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use api_envelope::cli::{
    handle_decrypt_command, handle_encrypt_command, handle_endpoint_command, handle_key_command,
    DecryptArgs, EncryptArgs, EndpointCommands, KeyCommands,
};
use api_envelope::config::{paths::HOME_ENV, AppPaths, Settings};

#[derive(Parser)]
#[command(
    name = "api-envelope",
    version,
    about = "Encrypt and decrypt back-office API bodies",
    long_about = "api-envelope seals JSON payloads into { \"data\": \"<ciphertext>\" } \
                  envelopes with AES-256-GCM and opens envelopes captured from the API. \
                  Per-endpoint settings decide which bodies are encrypted."
)]
struct Cli {
    /// Configuration directory
    #[arg(long, global = true, env = HOME_ENV)]
    home: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a JSON payload into a request body
    #[command(alias = "seal")]
    Encrypt(EncryptArgs),

    /// Decrypt a response body or ciphertext string
    #[command(alias = "open")]
    Decrypt(DecryptArgs),

    /// Key management commands
    #[command(subcommand)]
    Key(KeyCommands),

    /// Per-endpoint body mode commands
    #[command(subcommand)]
    Endpoint(EndpointCommands),

    /// Write a default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = match cli.home {
        Some(dir) => AppPaths::with_base_dir(dir),
        None => AppPaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;
    tracing::debug!(base_dir = %paths.base_dir().display(), "settings loaded");

    match cli.command {
        Some(Commands::Encrypt(args)) => handle_encrypt_command(&settings, args)?,
        Some(Commands::Decrypt(args)) => handle_decrypt_command(&settings, args)?,
        Some(Commands::Key(cmd)) => handle_key_command(&paths, &mut settings, cmd)?,
        Some(Commands::Endpoint(cmd)) => handle_endpoint_command(&paths, &mut settings, cmd)?,
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("Already initialized at: {}", paths.settings_file().display());
            } else {
                settings.save(&paths)?;
                println!("Initialized api-envelope at: {}", paths.base_dir().display());
                println!();
                println!("Next: run 'api-envelope key generate --save' or set {}.", settings.key.key_env);
            }
        }
        Some(Commands::Config) => {
            println!("api-envelope Configuration");
            println!("==========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Key env var:        {}", settings.key.key_env);
            println!("  Inline key:         {}", settings.key.key.is_some());
            println!("  Passphrase-derived: {}", settings.key.key_params.is_some());
            println!(
                "  Default modes:      request {}, response {}",
                settings.endpoints.default.request, settings.endpoints.default.response
            );
            println!("  Endpoint overrides: {}", settings.endpoints.override_count());
        }
        None => {
            println!("api-envelope - encrypted transport for the back-office API");
            println!();
            println!("Run 'api-envelope --help' for usage information.");
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("api_envelope=debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
