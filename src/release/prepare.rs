//! Release preparation: local commits and tags in both repositories
//!
//! Steps run in a fixed order and each one commits before the next starts.
//! The release tag is created between the two changelog commits so that it
//! points at the commit carrying the dated heading.

use crate::checks::RepoHandle;
use crate::core::context::ReleaseContext;
use crate::core::error::{ReleaseResult, ResultExt};
use crate::edit::change_line;
use crate::release::changelog::{self, DEVELOPMENT_MESSAGE, UNRELEASED_HEADING};
use crate::release::version::ReleaseVersion;
use chrono::{DateTime, Local};
use std::fs;
use std::path::PathBuf;

/// `backup/<unix-timestamp>`
pub fn backup_tag_name(now: &DateTime<Local>) -> String {
  format!("backup/{}", now.timestamp())
}

/// Website document path relative to the website repository root
pub fn website_document(ctx: &ReleaseContext<'_>, version: &ReleaseVersion) -> PathBuf {
  ctx
    .layout
    .website_spec_dir
    .join(version.document_name(ctx.layout.document_extension()))
}

/// Commit and tag the release locally in both repositories
pub fn prepare_release(
  ctx: &ReleaseContext<'_>,
  spec: &RepoHandle,
  website: &RepoHandle,
  version: &ReleaseVersion,
  now: DateTime<Local>,
) -> ReleaseResult<()> {
  let log = ctx.log;

  // Manual rollback anchors
  let backup_tag = backup_tag_name(&now);
  spec.git.create_annotated_tag(&backup_tag, "backup")?;
  website.git.create_annotated_tag(&backup_tag, "backup")?;
  log.info(&format!("Created {} in {} and {}", backup_tag, spec.name, website.name));

  let release_heading = changelog::release_heading(version, now.date_naive());
  let release_message = version.release_message();
  let changelog_path = ctx.changelog();

  log.task("Updating changelog for release", || {
    change_line(&changelog_path, UNRELEASED_HEADING, &[release_heading.as_str()])?;
    spec.git.commit_paths(&release_message, &[ctx.layout.changelog.as_path()])
  })?;

  log.task("Creating release tag", || {
    spec.git.create_annotated_tag(version.tag_name(), &release_message)
  })?;

  log.task("Updating changelog for development", || {
    change_line(
      &changelog_path,
      &release_heading,
      &changelog::development_block(&release_heading),
    )?;
    spec.git.commit_paths(DEVELOPMENT_MESSAGE, &[ctx.layout.changelog.as_path()])
  })?;

  let document = website_document(ctx, version);
  let destination = ctx.website_root.join(&document);

  log.task("Copy to website", || {
    let source = ctx.spec_document();
    fs::copy(&source, &destination)
      .with_context(|| format!("Failed to copy {} to {}", source.display(), destination.display()))?;
    Ok(())
  })?;

  log.task("Update title", || {
    let (title, underline) = changelog::versioned_title(&ctx.layout, version);
    change_line(&destination, &ctx.layout.title, &[title])?;
    change_line(&destination, &ctx.layout.title_underline, &[underline])?;
    Ok(())
  })?;

  log.task("Commit new version", || {
    website.git.commit_paths(&release_message, &[document.as_path()])
  })?;

  Ok(())
}
