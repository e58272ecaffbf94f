//! # Action-Hook Table
//!
//! File: cli/src/commands/image/hooks.rs
//!
//! ## Overview
//!
//! The fixed mapping from `powershift image` subcommand names to the
//! action-hook scripts they hand control to. Every subcommand goes through the
//! same table and the same dispatch function in `image::dispatch`; the only
//! per-hook variation is the script filename and how trailing arguments are
//! treated (`ArgumentPolicy`).
//!
use crate::core::error::{PowershiftError, Result};
use anyhow::anyhow;
use std::path::{Path, PathBuf};

/// How an action hook treats arguments given after its subcommand name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentPolicy {
    /// No arguments accepted.
    None,
    /// One or more arguments, forwarded verbatim.
    VariadicPassthrough,
    /// Exactly one argument, forwarded as the script's only argument.
    SingleRequired,
}

/// One entry of the action-hook table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionHook {
    pub name: &'static str,
    pub script: &'static str,
    pub policy: ArgumentPolicy,
}

impl ActionHook {
    const fn new(name: &'static str, script: &'static str, policy: ArgumentPolicy) -> Self {
        Self {
            name,
            script,
            policy,
        }
    }

    /// Full path of this hook's script inside `scripts_dir`.
    pub fn script_path(&self, scripts_dir: &Path) -> PathBuf {
        scripts_dir.join(self.script)
    }

    /// Checks `extra` against the hook's policy and returns the argument
    /// vector to forward (not including `argv[0]`).
    pub fn arguments(&self, extra: Vec<String>) -> Result<Vec<String>> {
        let expected = match self.policy {
            ArgumentPolicy::None if extra.is_empty() => return Ok(extra),
            ArgumentPolicy::SingleRequired if extra.len() == 1 => return Ok(extra),
            ArgumentPolicy::VariadicPassthrough if !extra.is_empty() => return Ok(extra),
            ArgumentPolicy::None => "takes no arguments",
            ArgumentPolicy::SingleRequired => "requires exactly one argument",
            ArgumentPolicy::VariadicPassthrough => "requires at least one argument",
        };
        Err(anyhow!(PowershiftError::HookArguments {
            hook: self.name.to_string(),
            expected,
            actual: extra.len(),
        }))
    }
}

/// All action hooks, in the order they are listed in `--help`.
pub static ACTION_HOOKS: [ActionHook; 10] = [
    ActionHook::new("assemble", "assemble.sh", ArgumentPolicy::None),
    ActionHook::new("run", "run.sh", ArgumentPolicy::None),
    ActionHook::new("shell", "shell.sh", ArgumentPolicy::None),
    ActionHook::new("exec", "exec.sh", ArgumentPolicy::VariadicPassthrough),
    ActionHook::new("verify", "verify.sh", ArgumentPolicy::None),
    ActionHook::new("ready", "ready.sh", ArgumentPolicy::None),
    ActionHook::new("alive", "alive.sh", ArgumentPolicy::None),
    ActionHook::new("setup", "setup.sh", ArgumentPolicy::None),
    ActionHook::new("migrate", "migrate.sh", ArgumentPolicy::None),
    ActionHook::new("jobs", "jobs.sh", ArgumentPolicy::SingleRequired),
];

/// Looks up an action hook by subcommand name.
pub fn find(name: &str) -> Result<&'static ActionHook> {
    ACTION_HOOKS
        .iter()
        .find(|hook| hook.name == name)
        .ok_or_else(|| anyhow!(PowershiftError::UnknownHook(name.to_string())))
}

/// Help text listing which script each subcommand runs.
pub fn scripts_help() -> String {
    let mut help = String::from("Action hook scripts:\n");
    for hook in &ACTION_HOOKS {
        help.push_str(&format!("  {:<10}{}\n", hook.name, hook.script));
    }
    help
}
