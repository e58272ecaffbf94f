//! # Powershift Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the command groups of the `powershift` CLI and
//! makes them available to `main.rs`. Each group defines its own arguments
//! structure and handler function.
//!
//! ## Command Groups
//!
//! - `image`: Action hooks for working inside S2I based images
//!

/// Command group for S2I image action hooks. Includes subcommands like `assemble`, `run`, `exec`, `jobs`.
pub mod image;
