//! Blocking subprocess execution behind a narrow, mockable interface.
//!
//! The runner takes a full argument vector (program first) and hands back
//! captured stdout, stderr, and the exit code. It does not judge the exit
//! code; callers that care inspect `CommandOutput::exit_code` themselves.

use std::ffi::OsString;
use std::process::Command;

use log::debug;

use crate::error::{AudiocheckError, Result};

/// Captured output of a finished subprocess.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

/// Runs a subprocess synchronously and captures its output.
///
/// Implementations block until the process exits; spawning one process per
/// call with no retries. Only a failure to start the process is an error.
pub trait CommandRunner {
    fn run(&self, argv: &[OsString]) -> Result<CommandOutput>;
}

/// `CommandRunner` backed by `std::process::Command`.
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, argv: &[OsString]) -> Result<CommandOutput> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            AudiocheckError::CommandExecution("empty argument vector".to_string())
        })?;

        debug!("Running command: {:?}", argv);

        let output = Command::new(program).args(args).output().map_err(|e| {
            AudiocheckError::CommandExecution(format!(
                "Failed to execute {}: {}",
                program.to_string_lossy(),
                e
            ))
        })?;

        if !output.status.success() {
            debug!(
                "Command {} exited with {:?}: {}",
                program.to_string_lossy(),
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            );
        }

        Ok(CommandOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<OsString> {
        parts.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_run_command_echo() {
        let output = SystemCommandRunner.run(&argv(&["echo", "test"])).unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "test");
        assert_eq!(output.exit_code, Some(0));
    }

    #[test]
    fn test_nonzero_exit_is_reported_not_raised() {
        let output = SystemCommandRunner.run(&argv(&["false"])).unwrap();
        assert_eq!(output.exit_code, Some(1));
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let result = SystemCommandRunner.run(&argv(&["/nonexistent/program"]));
        assert!(matches!(result, Err(AudiocheckError::CommandExecution(_))));
    }

    #[test]
    fn test_empty_argv_is_an_error() {
        let result = SystemCommandRunner.run(&[]);
        assert!(matches!(result, Err(AudiocheckError::CommandExecution(_))));
    }
}
