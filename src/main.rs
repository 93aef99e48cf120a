use anyhow::Context;
use clap::Parser;
use route_browser::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let result = run(args);

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => {
                result.context("Command failed")?;
                Ok(())
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to install CTRL+C signal handler")?;
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(route_browser::Error::processing_interrupted("Interrupted by user").into())
            }
        }
    })
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Route Browser - country road-trip routes with filters and GPX export");
    println!("====================================================================");
    println!();
    println!("USAGE:");
    println!("    route-browser <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    fetch       Download country route files that are not cached yet");
    println!("    browse      Load routes, apply filters and report the visible set");
    println!("    export      Load routes, apply filters and write them as GPX");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Increase logging verbosity");
    println!("    -q, --quiet      Suppress output except errors");
    println!("    -c, --config     Path to a JSON configuration file");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Download every country into the default data directory:");
    println!("    route-browser fetch");
    println!();
    println!("    # Show mountain routes rated 4 and up in France and Italy:");
    println!("    route-browser browse --countries France,Italy --road-types Mountain --min-rating 4");
    println!();
    println!("    # Export the same selection as GPX:");
    println!("    route-browser export --countries France,Italy --min-rating 4 -o alps.gpx");
    println!();
    println!("For detailed help on any command, use:");
    println!("    route-browser <COMMAND> --help");
}
