pub mod system_git;
mod system_git_ops;

pub use system_git::SystemGit;

use crate::core::error::CommandError;
use std::process::Output;

/// Outcome of one git invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
  /// Exit status zero
  Success { stdout: String },
  /// Non-zero exit status (or killed by a signal)
  Failure {
    code: Option<i32>,
    stdout: String,
    stderr: String,
  },
}

impl CommandOutcome {
  /// Classify a finished process
  pub fn from_output(output: &Output) -> Self {
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    if output.status.success() {
      CommandOutcome::Success { stdout }
    } else {
      CommandOutcome::Failure {
        code: output.status.code(),
        stdout,
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
      }
    }
  }

  /// Stdout without trailing newlines, or the failure as a `CommandError`
  pub fn into_stdout(self, command: &str) -> Result<String, CommandError> {
    match self {
      CommandOutcome::Success { stdout } => Ok(stdout.trim_end_matches('\n').to_string()),
      CommandOutcome::Failure { code, stdout, stderr } => Err(CommandError {
        command: command.to_string(),
        code,
        stdout,
        stderr,
      }),
    }
  }
}
