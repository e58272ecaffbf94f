//! # Powershift CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests under `cli/tests/`. The main
//! piece is `HookFixture`, a throwaway directory layout holding stub
//! action-hook scripts plus an isolated home, config directory and working
//! directory, so tests never pick up a real user's configuration.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates an `assert_cmd::Command` for the compiled `powershift` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn powershift_cmd() -> Command {
    Command::cargo_bin("powershift").expect("Failed to find powershift binary for testing")
}

/// Temporary scripts directory plus an isolated environment to run in.
///
/// Layout:
/// - `scripts/`: stub action hooks
/// - `home/`: `HOME`
/// - `config/`: `XDG_CONFIG_HOME`
/// - `work/`: working directory, marked as a git root to bound the
///   `.powershift.toml` search
pub struct HookFixture {
    root: TempDir,
}

impl HookFixture {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("Failed to create temp dir");
        for dir in ["scripts", "home", "config", "work/.git"] {
            fs::create_dir_all(root.path().join(dir)).expect("Failed to create fixture dir");
        }
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.root().join("scripts")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.root().join("work")
    }

    pub fn config_home(&self) -> PathBuf {
        self.root().join("config")
    }

    /// Path of a marker file scripts can create to prove they ran.
    pub fn marker(&self) -> PathBuf {
        self.root().join("ran")
    }

    /// Writes an executable `#!/bin/sh` script into `dir`.
    pub fn write_script_in(&self, dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod script");
        path
    }

    /// Writes an executable script into the fixture's scripts directory.
    pub fn write_script(&self, name: &str, body: &str) -> PathBuf {
        self.write_script_in(&self.scripts_dir(), name, body)
    }

    /// Writes a script that only records that it was started.
    pub fn write_marker_script(&self, name: &str) -> PathBuf {
        let body = format!("touch '{}'", self.marker().display());
        self.write_script(name, &body)
    }

    fn isolate(&self, cmd: &mut Command) {
        cmd.env_remove("POWERSHIFT_IMAGE_SCRIPTS")
            .env_remove("RUST_LOG")
            .env("HOME", self.root().join("home"))
            .env("XDG_CONFIG_HOME", self.config_home())
            .current_dir(self.work_dir());
    }

    /// A `powershift` command running in the isolated environment, with no
    /// scripts directory configured.
    pub fn bare_cmd(&self) -> Command {
        let mut cmd = powershift_cmd();
        self.isolate(&mut cmd);
        cmd
    }

    /// Runs `powershift <args...>` from a working directory that is deleted
    /// just before the binary starts. A `sh` wrapper does the `cd` and
    /// `rmdir`, then execs the binary.
    pub fn removed_cwd_cmd(&self, args: &[&str]) -> Command {
        let doomed = self.work_dir().join("doomed");
        fs::create_dir_all(&doomed).expect("Failed to create doomed dir");
        let mut cmd = Command::new("sh");
        self.isolate(&mut cmd);
        cmd.arg("-c")
            .arg(r#"cd "$1" && rmdir "$1" && shift && exec "$@""#)
            .arg("sh")
            .arg(&doomed)
            .arg(assert_cmd::cargo::cargo_bin("powershift"))
            .args(args);
        cmd
    }

    /// Writes the user-level `config.toml` under `XDG_CONFIG_HOME`.
    pub fn write_user_config(&self, content: &str) {
        let dir = self.config_home().join("powershift");
        fs::create_dir_all(&dir).expect("Failed to create user config dir");
        fs::write(dir.join("config.toml"), content).expect("Failed to write user config");
    }

    /// `powershift image --scripts-dir <fixture scripts> <args...>`.
    pub fn image_cmd(&self, args: &[&str]) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.arg("image")
            .arg("--scripts-dir")
            .arg(self.scripts_dir())
            .args(args);
        cmd
    }
}
