//! Release operations for SystemGit (remotes, status, tags, commits, pushes)

use super::system_git::SystemGit;
use crate::core::error::ReleaseResult;
use std::ffi::OsStr;
use std::path::Path;

impl SystemGit {
  /// Configured URL of a remote (`git config --get remote.<name>.url`)
  pub fn remote_url(&self, name: &str) -> ReleaseResult<String> {
    let key = format!("remote.{}.url", name);
    self.run_checked(["config", "--get", key.as_str()])
  }

  /// Current branch name, empty on a detached HEAD
  pub fn current_branch(&self) -> ReleaseResult<String> {
    self.run_checked(["branch", "--show-current"])
  }

  /// `git status --porcelain`, empty when the working tree is clean
  pub fn status_porcelain(&self) -> ReleaseResult<String> {
    self.run_checked(["status", "--porcelain"])
  }

  /// Fetch a remote (`git remote update <name>`)
  pub fn update_remote(&self, name: &str) -> ReleaseResult<()> {
    self.run_checked(["remote", "update", name])?;
    Ok(())
  }

  /// Commits on either side of `<branch>...<remote>/<branch>`
  ///
  /// Each line is prefixed with `<` (only local) or `>` (only on the remote).
  pub fn divergence(&self, branch: &str, remote: &str) -> ReleaseResult<Vec<String>> {
    let range = format!("{}...{}/{}", branch, remote, branch);
    let stdout = self.run_checked(["rev-list", "--left-right", range.as_str()])?;

    Ok(
      stdout
        .lines()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect(),
    )
  }

  /// Create an annotated tag at HEAD
  pub fn create_annotated_tag(&self, name: &str, message: &str) -> ReleaseResult<()> {
    self.run_checked(["tag", "-m", message, name])?;
    Ok(())
  }

  /// Stage paths
  pub fn add(&self, paths: &[&Path]) -> ReleaseResult<()> {
    let mut args: Vec<&OsStr> = vec![OsStr::new("add"), OsStr::new("--")];
    args.extend(paths.iter().map(|p| p.as_os_str()));
    self.run_checked(args)?;
    Ok(())
  }

  /// Commit staged changes
  pub fn commit(&self, message: &str) -> ReleaseResult<()> {
    self.run_checked(["commit", "-m", message])?;
    Ok(())
  }

  /// Stage paths and commit them
  pub fn commit_paths(&self, message: &str, paths: &[&Path]) -> ReleaseResult<()> {
    self.add(paths)?;
    self.commit(message)
  }

  /// Push refs to a remote (`git push <remote> <refs>...`)
  pub fn push(&self, remote: &str, refs: &[&str]) -> ReleaseResult<()> {
    let mut args = vec!["push", remote];
    args.extend_from_slice(refs);
    self.run_checked(args)?;
    Ok(())
  }
}
