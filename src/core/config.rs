//! Release layout: the repository and file names the recipe works on
//!
//! The defaults are the toml-lang layout. A `release.toml` in the spec
//! repository may rename things (useful for forks and local rehearsals), but
//! the sequence of release steps is never configurable.

use crate::core::error::{ConfigError, ReleaseResult, ResultExt};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Names and paths used by the release recipe
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseLayout {
  /// GitHub organisation owning both upstream repositories
  pub organization: String,

  /// Name of the spec repository (the current directory)
  pub spec_repo: String,

  /// Name of the website repository, cloned next to the spec repository
  pub website_repo: String,

  /// Changelog inside the spec repository
  pub changelog: PathBuf,

  /// Rendered specification inside the spec repository
  pub spec_document: PathBuf,

  /// Directory of versioned documents inside the website repository
  pub website_spec_dir: PathBuf,

  /// Title line of the specification document
  pub title: String,

  /// Underline below the title
  pub title_underline: String,
}

impl Default for ReleaseLayout {
  fn default() -> Self {
    Self {
      organization: "toml-lang".to_string(),
      spec_repo: "toml".to_string(),
      website_repo: "toml.io".to_string(),
      changelog: PathBuf::from("CHANGELOG.md"),
      spec_document: PathBuf::from("toml.md"),
      website_spec_dir: PathBuf::from("specs").join("en"),
      title: "TOML".to_string(),
      title_underline: "====".to_string(),
    }
  }
}

impl ReleaseLayout {
  /// Config file locations, searched in order
  pub fn find_config_path(spec_root: &Path) -> Option<PathBuf> {
    let candidates = vec![
      spec_root.join("release.toml"),
      spec_root.join(".release.toml"),
      spec_root.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load the layout, falling back to the toml-lang defaults when no
  /// release.toml exists
  pub fn load(spec_root: &Path) -> ReleaseResult<Self> {
    let Some(config_path) = Self::find_config_path(spec_root) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let layout: ReleaseLayout = toml_edit::de::from_str(&content)?;
    layout.validate()?;

    Ok(layout)
  }

  /// Reject values the recipe cannot work with
  pub fn validate(&self) -> Result<(), ConfigError> {
    let names = [
      ("organization", &self.organization),
      ("spec_repo", &self.spec_repo),
      ("website_repo", &self.website_repo),
      ("title", &self.title),
    ];
    for (field, value) in names {
      if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
      }
    }

    if self.website_repo.contains(['/', '\\']) {
      return Err(invalid("website_repo", "must be a directory name, not a path"));
    }

    if self.title_underline.is_empty() || !self.title_underline.chars().all(|c| c == '=') {
      return Err(invalid("title_underline", "must be a non-empty run of '=' characters"));
    }

    let paths = [
      ("changelog", &self.changelog),
      ("spec_document", &self.spec_document),
      ("website_spec_dir", &self.website_spec_dir),
    ];
    for (field, path) in paths {
      if path.as_os_str().is_empty() {
        return Err(invalid(field, "must not be empty"));
      }
      if path.is_absolute() {
        return Err(invalid(field, "must be relative to the repository root"));
      }
    }

    Ok(())
  }

  /// `git@github.com:<organization>/<repo>.git`
  pub fn expected_upstream_url(&self, repo: &str) -> String {
    format!("git@github.com:{}/{}.git", self.organization, repo)
  }

  /// Extension of the published document, taken from the source document
  pub fn document_extension(&self) -> &str {
    self
      .spec_document
      .extension()
      .and_then(|ext| ext.to_str())
      .unwrap_or("md")
  }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
  ConfigError::InvalidField {
    field: field.to_string(),
    reason: reason.to_string(),
  }
}
