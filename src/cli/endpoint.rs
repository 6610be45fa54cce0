//! Endpoint policy commands

use clap::Subcommand;

use crate::config::{AppPaths, Settings};
use crate::display::format_endpoint_policy;
use crate::error::EnvelopeResult;
use crate::transport::{normalize_path, BodyMode, EndpointModes};

/// Endpoint policy commands
#[derive(Subcommand, Debug)]
pub enum EndpointCommands {
    /// List the default modes and per-endpoint overrides
    #[command(alias = "ls")]
    List,

    /// Set the modes for one endpoint path
    Set {
        /// Endpoint path, e.g. /banner/list
        path: String,
        /// Request body mode
        #[arg(long, default_value = "encrypted")]
        request: BodyMode,
        /// Response body mode
        #[arg(long, default_value = "encrypted")]
        response: BodyMode,
    },

    /// Remove the override for one endpoint path
    #[command(alias = "rm")]
    Remove {
        /// Endpoint path
        path: String,
    },

    /// Change the default modes
    Default {
        /// Request body mode
        #[arg(long)]
        request: Option<BodyMode>,
        /// Response body mode
        #[arg(long)]
        response: Option<BodyMode>,
    },
}

/// Handle endpoint commands
pub fn handle_endpoint_command(
    paths: &AppPaths,
    settings: &mut Settings,
    cmd: EndpointCommands,
) -> EnvelopeResult<()> {
    match cmd {
        EndpointCommands::List => {
            print!("{}", format_endpoint_policy(&settings.endpoints));
        }
        EndpointCommands::Set {
            path,
            request,
            response,
        } => {
            settings
                .endpoints
                .set(&path, EndpointModes::new(request, response))?;
            settings.save(paths)?;
            println!(
                "Set {}: request {}, response {}",
                normalize_path(&path),
                request,
                response
            );
        }
        EndpointCommands::Remove { path } => match settings.endpoints.remove(&path) {
            Some(_) => {
                settings.save(paths)?;
                println!("Removed override for {}", normalize_path(&path));
            }
            None => println!("No override for {}", normalize_path(&path)),
        },
        EndpointCommands::Default { request, response } => {
            if let Some(request) = request {
                settings.endpoints.default.request = request;
            }
            if let Some(response) = response {
                settings.endpoints.default.response = response;
            }
            settings.save(paths)?;
            println!(
                "Default: request {}, response {}",
                settings.endpoints.default.request, settings.endpoints.default.response
            );
        }
    }

    Ok(())
}
