//! Repository inspection

use crate::core::config::ReleaseLayout;
use crate::core::error::{PreconditionError, ReleaseResult};
use crate::core::vcs::SystemGit;
use crate::ui::log::Logger;
use std::path::Path;

/// Remote holding the canonical repository
pub const UPSTREAM_REMOTE: &str = "upstream";

/// Remote holding the operator's own copy
pub const ORIGIN_REMOTE: &str = "origin";

/// Branch names accepted as a default branch
pub const DEFAULT_BRANCHES: [&str; 2] = ["main", "master"];

/// A repository that passed every release precondition
#[derive(Debug, Clone)]
pub struct RepoHandle {
  /// Repository name on GitHub (`toml`, `toml.io`)
  pub name: String,
  /// Default branch currently checked out
  pub branch: String,
  pub git: SystemGit,
}

/// Open `path` and run all preconditions against it
pub fn inspect_repository(log: &Logger, layout: &ReleaseLayout, name: &str, path: &Path) -> ReleaseResult<RepoHandle> {
  let git = SystemGit::open(path)?;

  let upstream = git.remote_url(UPSTREAM_REMOTE)?;
  check_upstream(&upstream, &layout.expected_upstream_url(name))?;

  let branch = git.current_branch()?;
  check_branch(&branch)?;

  check_clean(&git.status_porcelain()?)?;

  log.task("Checking against remote", || {
    git.update_remote(UPSTREAM_REMOTE)?;
    let deviation = git.divergence(&branch, UPSTREAM_REMOTE)?;
    check_up_to_date(&deviation)?;
    Ok(())
  })?;

  Ok(RepoHandle {
    name: name.to_string(),
    branch,
    git,
  })
}

fn check_upstream(actual: &str, expected: &str) -> Result<(), PreconditionError> {
  if actual != expected {
    return Err(PreconditionError::IncorrectUpstream {
      url: actual.to_string(),
    });
  }
  Ok(())
}

fn check_branch(branch: &str) -> Result<(), PreconditionError> {
  if !DEFAULT_BRANCHES.contains(&branch) {
    return Err(PreconditionError::UnexpectedBranch {
      branch: branch.to_string(),
    });
  }
  Ok(())
}

fn check_clean(status: &str) -> Result<(), PreconditionError> {
  if !status.is_empty() {
    return Err(PreconditionError::DirtyWorkingDirectory {
      status: status.to_string(),
    });
  }
  Ok(())
}

fn check_up_to_date(deviation: &[String]) -> Result<(), PreconditionError> {
  if !deviation.is_empty() {
    return Err(PreconditionError::DeviatesFromUpstream {
      deviation: deviation.join("\n"),
    });
  }
  Ok(())
}
