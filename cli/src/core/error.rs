//! # Powershift Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout the `powershift`
//! binary. Domain failures are variants of `PowershiftError`; everything is
//! propagated as `anyhow::Error` so call sites can attach context.
//!
//! ## Architecture
//!
//! - `PowershiftError`: A custom error enum using `thiserror`
//! - `Result<T>`: A type alias for `anyhow::Result<T>`
//!
//! The variants cover:
//! - Configuration errors (bad TOML values, unusable scripts directory)
//! - Process replacement failures (script missing or not executable)
//! - Action-hook argument policy violations
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! return Err(anyhow!(PowershiftError::Config(format!(
//!     "Scripts path '{}' is not a directory.",
//!     path.display()
//! ))));
//!
//! // Check for a specific failure
//! if let Some(PowershiftError::ScriptExec { path, .. }) = err.downcast_ref() {
//!     eprintln!("cannot run {}", path.display());
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the powershift application.
#[derive(Error, Debug)]
pub enum PowershiftError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The OS refused to replace the process image with the script.
    #[error("Failed to execute action hook script '{}'", .path.display())]
    ScriptExec {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Action hook '{hook}' {expected}, got {actual} argument(s).")]
    HookArguments {
        hook: String,
        expected: &'static str,
        actual: usize,
    },

    #[error("Unknown action hook '{0}'.")]
    UnknownHook(String),
}

/// Type alias for Result using anyhow::Error.
pub type Result<T> = anyhow::Result<T>;
