//! Release version validation and the names derived from it

use crate::core::error::UsageError;
use std::fmt;

/// A validated release version (semver, no build metadata)
///
/// Holds the string exactly as the operator typed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
  /// Validate `raw` against the semver.org grammar and refuse build metadata
  pub fn parse(raw: &str) -> Result<Self, UsageError> {
    let version = semver::Version::parse(raw).map_err(|_| UsageError::InvalidVersion {
      version: raw.to_string(),
    })?;

    if !version.build.is_empty() {
      return Err(UsageError::BuildMetadata {
        version: raw.to_string(),
      });
    }

    Ok(Self(raw.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Name of the annotated release tag
  pub fn tag_name(&self) -> &str {
    &self.0
  }

  /// `Release v<version>`, used for commits and the tag
  pub fn release_message(&self) -> String {
    format!("Release v{}", self.0)
  }

  /// `v<version>.<ext>`, the published document name
  pub fn document_name(&self, extension: &str) -> String {
    format!("v{}.{}", self.0, extension)
  }
}

impl fmt::Display for ReleaseVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
