//! Release context - build once, pass everywhere
//!
//! Holds the logger, the layout, and the two resolved repository roots. The
//! spec repository is the current directory; the website repository is its
//! sibling named by the layout.

use crate::core::config::ReleaseLayout;
use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use crate::ui::log::Logger;
use std::path::{Path, PathBuf};

/// Shared state for one release run
pub struct ReleaseContext<'a> {
  /// Progress and error output
  pub log: &'a Logger,

  /// Names and paths of the recipe
  pub layout: ReleaseLayout,

  /// Spec repository root (absolute)
  pub spec_root: PathBuf,

  /// Website repository root (absolute, may not exist yet)
  pub website_root: PathBuf,
}

impl<'a> ReleaseContext<'a> {
  /// Resolve both repository roots from the spec repository directory
  pub fn build(log: &'a Logger, spec_dir: &Path) -> ReleaseResult<Self> {
    let spec_root = spec_dir
      .canonicalize()
      .with_context(|| format!("Failed to resolve {}", spec_dir.display()))?;
    let layout = ReleaseLayout::load(&spec_root)?;

    let parent = spec_root.parent().ok_or_else(|| {
      ReleaseError::with_help(
        format!("{} has no parent directory", spec_root.display()),
        format!("Clone {} next to {}", layout.website_repo, layout.spec_repo),
      )
    })?;
    let website_root = parent.join(&layout.website_repo);

    Ok(Self {
      log,
      layout,
      spec_root,
      website_root,
    })
  }

  /// Source document in the spec repository
  pub fn spec_document(&self) -> PathBuf {
    self.spec_root.join(&self.layout.spec_document)
  }

  /// Changelog in the spec repository
  pub fn changelog(&self) -> PathBuf {
    self.spec_root.join(&self.layout.changelog)
  }
}
