//! Release command implementation
//!
//! Validate, inspect both repositories, prepare locally, wait for the
//! operator, publish. Stopping at the prompt leaves both repositories
//! committed and tagged but unpushed.

use crate::checks::inspect_repository;
use crate::core::context::ReleaseContext;
use crate::core::error::{ReleaseResult, ResultExt};
use crate::release::ReleaseVersion;
use crate::release::prepare::prepare_release;
use crate::release::publish::push_release;
use crate::ui::log::Logger;
use crate::ui::prompt;
use chrono::Local;
use std::env;

/// Run the release for `raw_version` from the current directory
pub fn run_release(log: &Logger, raw_version: &str) -> ReleaseResult<()> {
  let version = ReleaseVersion::parse(raw_version)?;

  let spec_dir = env::current_dir().context("Failed to get current directory")?;
  let ctx = ReleaseContext::build(log, &spec_dir)?;
  let layout = &ctx.layout;

  let (spec, website) = log.task("Checking repositories", || {
    let spec = log.task(&layout.spec_repo, || {
      inspect_repository(log, layout, &layout.spec_repo, &ctx.spec_root)
    })?;
    let website = log.task(&layout.website_repo, || {
      inspect_repository(log, layout, &layout.website_repo, &ctx.website_root)
    })?;
    Ok((spec, website))
  })?;

  log.task("Preparing release", || {
    prepare_release(&ctx, &spec, &website, &version, Local::now())
  })?;

  // Last chance to stop before anything leaves the machine
  prompt::wait_for_enter("Press enter when ready.")?;

  log.task("Publishing release", || push_release(&ctx, &spec, &website, &version))?;

  Ok(())
}
