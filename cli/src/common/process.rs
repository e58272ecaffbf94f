//! # Powershift Process Replacement (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! This module wraps the operating system's process-replacement primitive
//! (`execv`). Replacing the process keeps the PID, open file descriptors,
//! signal dispositions and environment, and the replacement program's exit
//! status becomes the exit status seen by whoever launched `powershift`.
//! Spawning a child and waiting for it is a different thing and is not used
//! here.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process;
//!
//! let script = scripts_dir.join("run.sh");
//! // Only returns if the OS refused to run the script.
//! let never = process::replace_process(&script, &[])?;
//! match never {}
//! ```
//!
use crate::core::error::{PowershiftError, Result};
use anyhow::anyhow;
use std::convert::Infallible;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Output still buffered here would be lost once the image is replaced. A
/// failed flush cannot be recovered at this point, so it is only logged.
fn flush_before_exec(name: &str, stream: &mut impl Write) {
    if let Err(e) = stream.flush() {
        debug!("Failed to flush {} before exec: {}", name, e);
    }
}

/// Replaces the current process image with `program`.
///
/// `argv[0]` is set to `program` itself and `args` follow verbatim, with no
/// shell interpretation. Buffered stdout/stderr are flushed first so nothing
/// written before the switch is lost.
///
/// # Returns
///
/// Never returns on success. On failure returns `PowershiftError::ScriptExec`
/// carrying the OS error (e.g. not found, permission denied).
#[cfg(unix)]
pub fn replace_process(program: &Path, args: &[String]) -> Result<Infallible> {
    use std::os::unix::process::CommandExt;
    use std::process::Command;

    debug!("exec {} {:?}", program.display(), args);
    flush_before_exec("stdout", &mut io::stdout());
    flush_before_exec("stderr", &mut io::stderr());

    let source = Command::new(program).arg0(program).args(args).exec();
    Err(anyhow!(PowershiftError::ScriptExec {
        path: program.to_path_buf(),
        source,
    }))
}

#[cfg(not(unix))]
pub fn replace_process(program: &Path, args: &[String]) -> Result<Infallible> {
    debug!("exec {} {:?}", program.display(), args);
    flush_before_exec("stdout", &mut io::stdout());
    flush_before_exec("stderr", &mut io::stderr());

    Err(anyhow!(PowershiftError::ScriptExec {
        path: program.to_path_buf(),
        source: io::Error::new(
            io::ErrorKind::Unsupported,
            "process replacement is only available on Unix platforms",
        ),
    }))
}

// Only failure paths can be exercised in-process: a successful call would
// replace the test harness itself.
#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    fn exec_error(result: Result<Infallible>) -> (std::path::PathBuf, io::ErrorKind) {
        let err = match result {
            Ok(never) => match never {},
            Err(e) => e,
        };
        match err.downcast::<PowershiftError>() {
            Ok(PowershiftError::ScriptExec { path, source }) => (path, source.kind()),
            other => panic!("Expected ScriptExec error, got {:?}", other),
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn test_flush_failure_does_not_stop_exec() {
        // A closed stdout must not prevent the hook from being attempted.
        flush_before_exec("stdout", &mut BrokenPipe);
        let dir = tempdir().unwrap();
        let (_, kind) = exec_error(replace_process(&dir.path().join("run.sh"), &[]));
        assert_eq!(kind, io::ErrorKind::NotFound);
    }

    #[test]
    fn test_missing_program_reports_not_found() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("assemble.sh");

        let (path, kind) = exec_error(replace_process(&script, &[]));
        assert_eq!(path, script);
        assert_eq!(kind, io::ErrorKind::NotFound);
    }

    #[test]
    fn test_non_executable_program_reports_permission_denied() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("verify.sh");
        fs::write(&script, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o644)).unwrap();

        let (path, kind) = exec_error(replace_process(&script, &["x".to_string()]));
        assert_eq!(path, script);
        assert_eq!(kind, io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_error_message_names_script() {
        let script = Path::new("/nonexistent/powershift/run.sh");
        let err = match replace_process(script, &[]) {
            Ok(never) => match never {},
            Err(e) => e,
        };
        assert!(err.to_string().contains("/nonexistent/powershift/run.sh"));
    }
}
