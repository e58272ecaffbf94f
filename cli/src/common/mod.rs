//! # Powershift Common Utilities
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared, command-independent helpers. Currently this is the
//! process-replacement wrapper used by every `image` subcommand.
//!

/// Replacing the current process image with an external program.
pub mod process;
