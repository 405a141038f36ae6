//! Publishing: push both repositories to `origin` and `upstream`
//!
//! Order is fixed: the spec repository first (branch head and release tag),
//! then the website repository (branch head only). The first failing push
//! stops everything after it.

use crate::checks::{ORIGIN_REMOTE, RepoHandle, UPSTREAM_REMOTE};
use crate::core::context::ReleaseContext;
use crate::core::error::ReleaseResult;
use crate::release::version::ReleaseVersion;

/// Remotes in push order
const PUSH_REMOTES: [&str; 2] = [ORIGIN_REMOTE, UPSTREAM_REMOTE];

/// Push the prepared release
pub fn push_release(
  ctx: &ReleaseContext<'_>,
  spec: &RepoHandle,
  website: &RepoHandle,
  version: &ReleaseVersion,
) -> ReleaseResult<()> {
  let log = ctx.log;
  log.info("Publishing changes...");

  log.task("specs repository", || push_all(ctx, spec, &["HEAD", version.tag_name()]))?;
  log.task("website repository", || push_all(ctx, website, &["HEAD"]))?;

  Ok(())
}

fn push_all(ctx: &ReleaseContext<'_>, repo: &RepoHandle, refs: &[&str]) -> ReleaseResult<()> {
  for remote in PUSH_REMOTES {
    repo.git.push(remote, refs)?;
    ctx
      .log
      .info(&format!("Pushed {} to {}/{}", refs.join(" "), remote, repo.branch));
  }
  Ok(())
}
