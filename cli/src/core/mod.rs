//! # Powershift Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by the command modules:
//! - `config`: Configuration loading, merging, validation and scripts-directory resolution
//! - `error`: Error types and the crate-wide `Result` alias
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{PowershiftError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
