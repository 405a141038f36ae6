//! Changelog and title lines used as exact-match anchors

use crate::core::config::ReleaseLayout;
use crate::release::version::ReleaseVersion;
use chrono::NaiveDate;

/// Section collecting changes since the last release
pub const UNRELEASED_HEADING: &str = "## unreleased";

/// Body of a fresh, empty unreleased section
pub const NOTHING_PLACEHOLDER: &str = "Nothing.";

/// Commit message of the second changelog commit
pub const DEVELOPMENT_MESSAGE: &str = "Bump for development";

/// `## <version> / <YYYY-MM-DD>`
pub fn release_heading(version: &ReleaseVersion, date: NaiveDate) -> String {
  format!("## {} / {}", version, date.format("%Y-%m-%d"))
}

/// Lines replacing the release heading when development resumes
///
/// A fresh unreleased section with a placeholder body, then the release
/// heading itself so the released section stays below it.
pub fn development_block(release_heading: &str) -> [String; 5] {
  [
    UNRELEASED_HEADING.to_string(),
    String::new(),
    NOTHING_PLACEHOLDER.to_string(),
    String::new(),
    release_heading.to_string(),
  ]
}

/// New title and an `=` underline of the same length
pub fn versioned_title(layout: &ReleaseLayout, version: &ReleaseVersion) -> (String, String) {
  let title = format!("{} v{}", layout.title, version);
  let underline = "=".repeat(title.chars().count());
  (title, underline)
}
