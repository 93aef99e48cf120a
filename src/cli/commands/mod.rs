//! Command implementations for the route browser CLI
//!
//! Each command is implemented in its own module:
//! - `fetch`: download country route files
//! - `browse`: load, filter and report the visible routes
//! - `export`: load, filter and write the visible routes as GPX

pub mod browse;
pub mod export;
pub mod fetch;
pub mod shared;

pub use shared::CommandStats;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};
use tracing::debug;

/// Main command runner
///
/// Sets up logging, loads configuration and dispatches to the subcommand.
pub async fn run(args: Args) -> Result<CommandStats> {
    shared::setup_logging(&args)?;
    debug!("Arguments: {:?}", args);

    let Some(command) = args.command.clone() else {
        return Err(Error::configuration("No command given"));
    };

    match command {
        Commands::Fetch(fetch_args) => fetch::run_fetch(&args, fetch_args).await,
        Commands::Browse(browse_args) => {
            let config = shared::load_configuration(&args)?;
            browse::run_browse(&args, browse_args, &config).await
        }
        Commands::Export(export_args) => {
            let config = shared::load_configuration(&args)?;
            export::run_export(&args, export_args, &config).await
        }
    }
}
