//! Runs that must stop before touching either repository

use crate::helpers::*;
use anyhow::Result;
use std::process::Output;

/// No release or backup tags and no new commits anywhere
fn assert_untouched(sandbox: &ReleaseSandbox) -> Result<()> {
  for repo in [&sandbox.spec, &sandbox.website] {
    assert!(tags(repo)?.is_empty(), "unexpected tags in {}", repo.display());
  }
  assert_eq!(sandbox.read_spec("CHANGELOG.md")?, CHANGELOG);
  for remote in ["origin", "upstream"] {
    assert_eq!(subject(&sandbox.remote(remote, SPEC_REPO), "main")?, "Initial commit");
    assert_eq!(subject(&sandbox.remote(remote, WEBSITE_REPO), "main")?, "Initial commit");
  }
  Ok(())
}

fn assert_user_error(output: &Output, message: &str) {
  assert_eq!(
    output.status.code(),
    Some(1),
    "stdout: {}\nstderr: {}",
    stdout(output),
    stderr(output)
  );
  assert!(
    stderr(output).contains(message),
    "expected {:?} in stderr: {}",
    message,
    stderr(output)
  );
}

#[test]
fn test_invalid_version() -> Result<()> {
  let sandbox = ReleaseSandbox::new()?;

  let output = sandbox.run_release(&["1.0"], "\n")?;
  assert_user_error(&output, "ERROR: Given version is not a valid semver: 1.0");
  assert!(!stdout(&output).contains("Checking repositories"));
  assert_untouched(&sandbox)?;

  let output = sandbox.run_release(&["01.0.0"], "\n")?;
  assert_user_error(&output, "Given version is not a valid semver: 01.0.0");

  Ok(())
}

#[test]
fn test_build_metadata_is_rejected() -> Result<()> {
  let sandbox = ReleaseSandbox::new()?;

  let output = sandbox.run_release(&["1.0.0+20210111"], "\n")?;
  assert_user_error(&output, "Shouldn't have build metadata in version: 1.0.0+20210111");
  assert_untouched(&sandbox)?;

  Ok(())
}

#[test]
fn test_wrong_arity() -> Result<()> {
  let sandbox = ReleaseSandbox::new()?;

  let output = sandbox.run_release(&[], "\n")?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("VERSION"));

  let output = sandbox.run_release(&["1.0.0", "1.1.0"], "\n")?;
  assert_eq!(output.status.code(), Some(1));

  assert_untouched(&sandbox)?;
  Ok(())
}

#[test]
fn test_help_exits_cleanly() -> Result<()> {
  let sandbox = ReleaseSandbox::new()?;

  let output = sandbox.run_release(&["--help"], "")?;
  assert!(output.status.success());
  assert!(stdout(&output).contains("VERSION"));

  Ok(())
}

#[test]
fn test_wrong_upstream() -> Result<()> {
  let sandbox = ReleaseSandbox::new()?;
  git(
    &sandbox.spec,
    &["remote", "set-url", "upstream", "git@github.com:someone/toml.git"],
  )?;

  let output = sandbox.run_release(&["1.0.0"], "\n")?;
  assert_user_error(&output, "ERROR: Got incorrect upstream repo: git@github.com:someone/toml.git");
  assert!(!stdout(&output).contains("toml.io..."));
  assert_untouched(&sandbox)?;

  Ok(())
}

#[test]
fn test_feature_branch_is_rejected() -> Result<()> {
  let sandbox = ReleaseSandbox::new()?;
  git(&sandbox.spec, &["checkout", "-b", "feature"])?;

  let output = sandbox.run_release(&["1.0.0"], "\n")?;
  assert_user_error(&output, "feature");
  assert_untouched(&sandbox)?;

  Ok(())
}

#[test]
fn test_dirty_website_aborts_before_any_mutation() -> Result<()> {
  let sandbox = ReleaseSandbox::new()?;
  std::fs::write(sandbox.website.join("notes.txt"), "draft\n")?;

  let output = sandbox.run_release(&["1.0.0"], "\n")?;
  assert_user_error(&output, "Dirty working directory");
  assert!(stderr(&output).contains("?? notes.txt"));

  // The spec repository passed its checks but nothing was prepared
  assert!(stdout(&output).contains("  toml...\n"));
  assert!(!stdout(&output).contains("Preparing release"));
  assert_untouched(&sandbox)?;

  Ok(())
}

#[test]
fn test_local_commit_ahead_of_upstream() -> Result<()> {
  let sandbox = ReleaseSandbox::new()?;
  std::fs::write(sandbox.spec.join("README.md"), "# TOML\n")?;
  git(&sandbox.spec, &["add", "README.md"])?;
  git(&sandbox.spec, &["commit", "-m", "Add readme"])?;

  let output = sandbox.run_release(&["1.0.0"], "\n")?;
  assert_user_error(&output, "Local branch deviates from upstream");
  assert!(tags(&sandbox.spec)?.is_empty());

  Ok(())
}

#[test]
fn test_upstream_ahead_of_local() -> Result<()> {
  let sandbox = ReleaseSandbox::new()?;
  std::fs::write(sandbox.website.join("index.md"), "# TOML\n")?;
  git(&sandbox.website, &["add", "index.md"])?;
  git(&sandbox.website, &["commit", "-m", "Add index"])?;
  git(&sandbox.website, &["push", "upstream", "main"])?;
  git(&sandbox.website, &["reset", "--hard", "HEAD~1"])?;

  let output = sandbox.run_release(&["1.0.0"], "\n")?;
  assert_user_error(&output, "Local branch deviates from upstream");
  assert!(tags(&sandbox.spec)?.is_empty());
  assert!(tags(&sandbox.website)?.is_empty());

  Ok(())
}

#[test]
fn test_missing_website_repository() -> Result<()> {
  let sandbox = ReleaseSandbox::new()?;
  std::fs::remove_dir_all(&sandbox.website)?;

  let output = sandbox.run_release(&["1.0.0"], "\n")?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("toml.io"));
  assert!(tags(&sandbox.spec)?.is_empty());

  Ok(())
}

#[test]
fn test_unknown_config_field() -> Result<()> {
  let sandbox = ReleaseSandbox::new()?;
  std::fs::write(sandbox.spec.join("release.toml"), "bogus = true\n")?;

  let output = sandbox.run_release(&["1.0.0"], "\n")?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("release.toml"));
  assert!(tags(&sandbox.spec)?.is_empty());

  Ok(())
}
