//! # Powershift Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the `powershift` CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command group handlers
//!
//! ## Architecture
//!
//! - Each top-level command group is a variant of the `Commands` enum
//! - Groups are handled by functions in their respective `commands` modules
//! - Errors are propagated to this level and reported once
//!
//! The `image` group normally never returns: its handler replaces this
//! process with an action-hook script, whose exit status becomes ours.
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! powershift --help
//!
//! # Show which script is being run
//! powershift -v image run
//! ```
//!
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command groups (image)
mod common; // Shared utilities (process replacement)
mod core; // Core infrastructure (errors, config)

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "powershift",
    about = "PowerShift command line tools",
    long_about = "PowerShift command line tools.\n\
                  The `image` group runs S2I action hooks inside a built image.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// All available top-level command groups.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble S2I based image and run application.
    Image(commands::image::ImageArgs),
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    // stdout belongs to the action-hook scripts.
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Image(args) => commands::image::handle_image(args),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
