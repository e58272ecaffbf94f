//! # Powershift Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads the optional TOML configuration for `powershift` and
//! resolves the one value the `image` command group needs from it: the
//! directory holding the action-hook scripts.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. `--scripts-dir` on the command line, or the `POWERSHIFT_IMAGE_SCRIPTS` environment variable
//!    (when given, no configuration file is read)
//! 2. Project-specific `.powershift.toml` in the current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/powershift/config.toml` on Linux)
//! 4. The built-in default, `<prefix>/share/powershift/image/scripts`, where
//!    `<prefix>` is the parent of the directory holding the running executable
//!
//! File format:
//!
//! ```toml
//! [image]
//! scripts_dir = "~/s2i/scripts"
//! ```
//!
//! Paths are tilde-expanded after merging, then validated.
//!
//! ## Examples
//!
//! ```rust
//! let cfg = match args.scripts_dir {
//!     Some(_) => config::Config::default(),
//!     None => config::load_config()?,
//! };
//! let scripts_dir = config::resolve_scripts_dir(args.scripts_dir.as_deref(), &cfg)?;
//! ```
//!
//! The configuration is loaded once per invocation, before dispatch.
//!
use crate::core::error::{PowershiftError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Environment variable that overrides the scripts directory.
pub const SCRIPTS_DIR_ENV: &str = "POWERSHIFT_IMAGE_SCRIPTS";

const PROJECT_CONFIG_FILENAME: &str = ".powershift.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub image: ImageConfig,
}

/// Settings for the `powershift image` command group.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ImageConfig {
    /// Directory containing the action-hook scripts (can use ~).
    #[serde(default)]
    pub scripts_dir: Option<String>,
}

/// Loads, merges, expands and validates the user and project configuration.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = match std::env::current_dir() {
        Ok(current_dir) => load_project_config(&current_dir)?,
        Err(e) => {
            warn!(
                "Could not determine current directory, skipping project configuration: {}",
                e
            );
            None
        }
    };
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "PowerShift", "powershift") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start: &Path) -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path(start) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!(
            "No project configuration file ({}) found in {} or ancestors.",
            PROJECT_CONFIG_FILENAME,
            start.display()
        );
        Ok(None)
    }
}

/// Walks up from `start` looking for `.powershift.toml`. The search stops at
/// the first directory containing `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project settings win over user settings, field by field.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    Config {
        image: ImageConfig {
            scripts_dir: project.image.scripts_dir.or(user.image.scripts_dir),
        },
    }
}

fn expand_config_paths(config: &mut Config) {
    if let Some(dir) = config.image.scripts_dir.as_mut() {
        *dir = shellexpand::tilde(dir.as_str()).into_owned();
        debug!("Expanded scripts directory: {}", dir);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if let Some(dir) = &config.image.scripts_dir {
        if dir.trim().is_empty() {
            return Err(anyhow!(PowershiftError::Config(
                "image.scripts_dir cannot be empty.".to_string()
            )));
        }
    }
    Ok(())
}

/// The scripts directory bundled with an installed binary:
/// `<exe>/../../share/powershift/image/scripts`.
pub fn default_scripts_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let bin_dir = exe.parent().ok_or_else(|| {
        anyhow!(PowershiftError::Config(format!(
            "Executable path '{}' has no parent directory.",
            exe.display()
        )))
    })?;
    let prefix = bin_dir.parent().unwrap_or(bin_dir);
    Ok(prefix
        .join("share")
        .join("powershift")
        .join("image")
        .join("scripts"))
}

/// Picks the scripts directory: explicit override, then configuration, then
/// the built-in default.
///
/// A path that exists but is not a directory is rejected. A missing
/// directory is only warned about; dispatch then fails on the missing script.
pub fn resolve_scripts_dir(override_dir: Option<&Path>, config: &Config) -> Result<PathBuf> {
    let scripts_dir = match (override_dir, &config.image.scripts_dir) {
        (Some(dir), _) => {
            debug!("Using scripts directory from command line/environment.");
            PathBuf::from(shellexpand::tilde(&dir.to_string_lossy()).into_owned())
        }
        (None, Some(dir)) => {
            debug!("Using scripts directory from configuration.");
            PathBuf::from(dir)
        }
        (None, None) => default_scripts_dir()?,
    };

    if !scripts_dir.exists() {
        warn!(
            "Scripts directory '{}' does not exist.",
            scripts_dir.display()
        );
    } else if !scripts_dir.is_dir() {
        return Err(anyhow!(PowershiftError::Config(format!(
            "Scripts path '{}' exists but is not a directory.",
            scripts_dir.display()
        ))));
    }
    info!("Resolved scripts directory: {}", scripts_dir.display());
    Ok(scripts_dir)
}
