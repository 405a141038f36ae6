//! System git backend
//!
//! Every operation is one `git -C <repo>` subprocess with an isolated
//! environment. Output is captured, never streamed.

use super::CommandOutcome;
use crate::core::error::{PreconditionError, ReleaseError, ReleaseResult, ResultExt};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Environment variables passed through to git
///
/// Enough to find the operator's config and identity, reach the remotes
/// (SSH agent, proxies) and sign tags. Everything else is dropped.
const INHERITED_ENV: &[&str] = &[
  "PATH",
  "HOME",
  "XDG_CONFIG_HOME",
  "GIT_CONFIG_GLOBAL",
  "GIT_AUTHOR_NAME",
  "GIT_AUTHOR_EMAIL",
  "GIT_COMMITTER_NAME",
  "GIT_COMMITTER_EMAIL",
  "EMAIL",
  "SSH_AUTH_SOCK",
  "GIT_SSH_COMMAND",
  "GNUPGHOME",
  "GPG_TTY",
  "HTTP_PROXY",
  "HTTPS_PROXY",
  "NO_PROXY",
  "http_proxy",
  "https_proxy",
  "no_proxy",
];

/// Git backend using system git
#[derive(Debug, Clone)]
pub struct SystemGit {
  /// Repository working directory
  pub(crate) repo_path: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to confirm `path` is inside a work tree.
  pub fn open(path: &Path) -> ReleaseResult<Self> {
    if !path.is_dir() {
      return Err(ReleaseError::Precondition(PreconditionError::RepoNotFound {
        path: path.to_path_buf(),
      }));
    }

    let git = Self {
      repo_path: path.to_path_buf(),
    };

    match git.run(["rev-parse", "--is-inside-work-tree"])? {
      CommandOutcome::Success { stdout } if stdout.trim() == "true" => Ok(git),
      _ => Err(ReleaseError::Precondition(PreconditionError::RepoNotFound {
        path: path.to_path_buf(),
      })),
    }
  }

  /// Run git with the given arguments and capture the outcome
  ///
  /// Only a failure to spawn git is an `Err`; a non-zero exit is a
  /// `CommandOutcome::Failure`.
  pub fn run<I, S>(&self, args: I) -> ReleaseResult<CommandOutcome>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    let output = self
      .git_cmd()
      .args(args)
      .output()
      .context("Failed to execute git (is it installed and on PATH?)")?;

    Ok(CommandOutcome::from_output(&output))
  }

  /// Run git and return its stdout, turning a non-zero exit into an error
  pub fn run_checked<I, S>(&self, args: I) -> ReleaseResult<String>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    let args: Vec<S> = args.into_iter().collect();
    let command = display_command(&args);
    let stdout = self.run(&args)?.into_stdout(&command)?;
    Ok(stdout)
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists `INHERITED_ENV` from the process environment
  /// - Adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    self.git_cmd_with_env(|key| std::env::var_os(key))
  }

  /// `git_cmd` with the inherited variables read through `lookup`
  fn git_cmd_with_env<F>(&self, lookup: F) -> Command
  where
    F: Fn(&str) -> Option<OsString>,
  {
    let mut cmd = Command::new("git");

    // Set working directory
    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust ambient GIT_* variables)
    cmd.env_clear();
    for key in INHERITED_ENV {
      if let Some(value) = lookup(key) {
        cmd.env(key, value);
      }
    }

    // Force safe behavior (override user config)
    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII
    cmd.arg("-c").arg("color.ui=never");

    cmd
  }
}

/// `git <args>` as the operator would type it
fn display_command<S: AsRef<OsStr>>(args: &[S]) -> String {
  let mut parts = vec!["git".to_string()];
  parts.extend(args.iter().map(|a| a.as_ref().to_string_lossy().to_string()));
  parts.join(" ")
}
