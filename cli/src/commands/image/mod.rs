//! # Powershift Image Command Group
//!
//! File: cli/src/commands/image/mod.rs
//!
//! ## Overview
//!
//! This module implements `powershift image`, the command group used inside
//! S2I based images. It extends the S2I build and run steps with action hooks
//! that customize installation and setup of the application, and the
//! environment it runs in. Each subcommand hands control to one bundled
//! action-hook script by replacing the current process; nothing returns here
//! once the script starts.
//!
//! ## Architecture
//!
//! - `ImageArgs`: Top-level arguments for `powershift image`, including the
//!   `--scripts-dir` override.
//! - `ImageCommand`: One variant per action hook.
//! - `hooks`: The constant table mapping each subcommand to its script and
//!   argument policy.
//! - `handle_image`: Resolves the scripts directory once, then calls `dispatch`.
//! - `dispatch`: The single generic routine shared by every subcommand.
//!
//! ## Examples
//!
//! ```bash
//! # Build step inside an S2I assemble script
//! powershift image assemble
//!
//! # Run a command with the application environment
//! powershift image exec python manage.py check --deploy
//!
//! # Run the nightly job category
//! powershift image jobs nightly
//!
//! # Use scripts from a custom location
//! powershift image --scripts-dir /opt/app-root/hooks verify
//! ```
//!
use crate::{
    common::process,
    core::{config, error::Result},
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub mod hooks;

use hooks::ActionHook;

/// # Image Command Group Arguments (`ImageArgs`)
#[derive(Parser, Debug)]
#[command(
    about = "Assemble S2I based image and run application",
    long_about = "Assemble S2I based image and run application.\n\n\
                  Extends S2I based image build and execution to incorporate action hooks \
                  which can customize installation and setup of the application, as well \
                  as the environment used when the application is run.\n\n\
                  Provides the means to create an interactive shell or run commands in the \
                  container with the same environment as the application.\n\n\
                  Also, allows the manual running of custom action hooks for initial setup \
                  of data, run data migration when updating to a new version of the \
                  application, verify an application after a build, test for readiness or \
                  liveness of an application.",
    after_help = hooks::scripts_help()
)]
pub struct ImageArgs {
    /// Directory containing the action-hook scripts.
    /// Overrides `image.scripts_dir` from the configuration files.
    #[arg(long, global = true, env = config::SCRIPTS_DIR_ENV, value_name = "DIR")]
    scripts_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: ImageCommand,
}

/// # Image Subcommands (`ImageCommand`)
///
/// Unit variants take no positional arguments, so clap rejects any extras
/// before dispatch.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum ImageCommand {
    /// Runs the build process for the image.
    Assemble,
    /// Runs the application built into the image.
    Run,
    /// Create a shell with application environment.
    Shell,
    /// Run a command with application environment.
    Exec(ExecArgs),
    /// Trigger action hook which verifies image.
    Verify,
    /// Trigger action hook which tests if ready.
    Ready,
    /// Trigger action hook which tests if alive.
    Alive,
    /// Triggers action hook to setup any data.
    Setup,
    /// Triggers action hook to migrate any data.
    Migrate,
    /// Triggers action hook to run jobs of a category.
    Jobs(JobsArgs),
}

/// Arguments for `powershift image exec`.
#[derive(Parser, Debug, PartialEq, Eq)]
pub struct ExecArgs {
    /// The command and its arguments. Everything after the first value is
    /// taken verbatim, including values that look like options.
    #[arg(
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    command: Vec<String>,
}

/// Arguments for `powershift image jobs`.
#[derive(Parser, Debug, PartialEq, Eq)]
pub struct JobsArgs {
    /// Job category to run (e.g. `hourly`, `nightly`).
    #[arg(required = true, allow_hyphen_values = true)]
    category: String,
}

impl ImageCommand {
    /// Splits the parsed subcommand into its action-hook name and the
    /// arguments to forward.
    fn into_parts(self) -> (&'static str, Vec<String>) {
        match self {
            ImageCommand::Assemble => ("assemble", Vec::new()),
            ImageCommand::Run => ("run", Vec::new()),
            ImageCommand::Shell => ("shell", Vec::new()),
            ImageCommand::Exec(args) => ("exec", args.command),
            ImageCommand::Verify => ("verify", Vec::new()),
            ImageCommand::Ready => ("ready", Vec::new()),
            ImageCommand::Alive => ("alive", Vec::new()),
            ImageCommand::Setup => ("setup", Vec::new()),
            ImageCommand::Migrate => ("migrate", Vec::new()),
            ImageCommand::Jobs(args) => ("jobs", vec![args.category]),
        }
    }
}

/// Settings computed once per invocation and handed to `dispatch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSettings {
    pub scripts_dir: PathBuf,
}

impl ImageSettings {
    /// Resolves the scripts directory. An explicit override is used as-is;
    /// configuration files are only read when there is none.
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self> {
        let cfg = match override_dir {
            Some(_) => config::Config::default(),
            None => config::load_config().context("Failed to load powershift configuration")?,
        };
        let scripts_dir = config::resolve_scripts_dir(override_dir, &cfg)?;
        Ok(Self { scripts_dir })
    }
}

/// # Handle Image Command (`handle_image`)
///
/// Entry point for `powershift image`. Resolves `ImageSettings` and hands the
/// chosen subcommand to `dispatch`.
///
/// ## Returns
///
/// Does not return on success: the process has become the action-hook
/// script. Returns `Err` if configuration is invalid or the script could not
/// be executed.
pub fn handle_image(args: ImageArgs) -> Result<()> {
    let settings = ImageSettings::resolve(args.scripts_dir.as_deref())?;
    let (name, extra) = args.command.into_parts();
    let hook = hooks::find(name)?;
    dispatch(hook, extra, &settings)
}

/// Replaces the current process with `hook`'s script.
///
/// `argv[0]` is the script path; `extra` follows after being checked against
/// the hook's argument policy. No existence check is made here: a missing or
/// non-executable script is reported by the OS.
pub fn dispatch(hook: &ActionHook, extra: Vec<String>, settings: &ImageSettings) -> Result<()> {
    let arguments = hook.arguments(extra)?;
    let script = hook.script_path(&settings.scripts_dir);
    info!("Running '{}' action hook: {}", hook.name, script.display());
    debug!("Forwarded arguments: {:?}", arguments);

    match process::replace_process(&script, &arguments)
        .with_context(|| format!("Unable to run the '{}' action hook", hook.name))?
    {}
}
