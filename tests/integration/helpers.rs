//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

pub const SPEC_REPO: &str = "toml";
pub const WEBSITE_REPO: &str = "toml.io";

pub const CHANGELOG: &str = "\
# Changelog

## unreleased

* Clarify that dotted keys define tables.

## 0.5.0 / 2018-07-11

* Add dotted keys.
";

pub const SPEC_DOCUMENT: &str = "\
TOML
====

Tom's Obvious, Minimal Language.
";

/// Both repositories cloned side by side, each with bare `origin` and
/// `upstream` remotes in the same temp directory
///
/// `upstream` points at the real GitHub URL so the upstream check passes;
/// a repo-local `url.<path>.insteadOf` redirects it to the bare repository.
pub struct ReleaseSandbox {
  _root: TempDir,
  pub root: PathBuf,
  pub spec: PathBuf,
  pub website: PathBuf,
}

impl ReleaseSandbox {
  /// Create both repositories with their remotes in sync
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    std::fs::create_dir_all(path.join("remotes"))?;

    let sandbox = Self {
      spec: path.join(SPEC_REPO),
      website: path.join(WEBSITE_REPO),
      root: path,
      _root: root,
    };

    sandbox.init_repo(SPEC_REPO, &[("CHANGELOG.md", CHANGELOG), ("toml.md", SPEC_DOCUMENT)])?;
    sandbox.init_repo(
      WEBSITE_REPO,
      &[("specs/en/v0.5.0.md", "TOML v0.5.0\n===========\n")],
    )?;

    Ok(sandbox)
  }

  /// Bare remote repository, e.g. `remote("upstream", "toml")`
  pub fn remote(&self, remote: &str, repo: &str) -> PathBuf {
    self.root.join("remotes").join(format!("{}-{}.git", remote, repo))
  }

  fn init_repo(&self, name: &str, files: &[(&str, &str)]) -> Result<()> {
    let path = self.root.join(name);
    std::fs::create_dir_all(&path)?;

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;
    git(&path, &["config", "commit.gpgsign", "false"])?;
    git(&path, &["config", "tag.gpgSign", "false"])?;

    for (file, content) in files {
      let file_path = path.join(file);
      if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
      }
      std::fs::write(file_path, content)?;
    }
    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial commit"])?;

    let github_url = format!("git@github.com:toml-lang/{}.git", name);
    for remote in ["origin", "upstream"] {
      let bare = self.remote(remote, name);
      git(&self.root, &["init", "--bare", "--initial-branch=main", path_str(&bare)?])?;
    }

    let origin = self.remote("origin", name);
    let upstream = self.remote("upstream", name);
    git(&path, &["remote", "add", "origin", path_str(&origin)?])?;
    git(&path, &["remote", "add", "upstream", &github_url])?;
    let rewrite_key = format!("url.{}.insteadOf", path_str(&upstream)?);
    git(&path, &["config", &rewrite_key, &github_url])?;

    git(&path, &["push", "origin", "main"])?;
    git(&path, &["push", "upstream", "main"])?;
    git(&path, &["fetch", "upstream"])?;

    Ok(())
  }

  /// Run toml-release from the spec repository, feeding `stdin`
  pub fn run_release(&self, args: &[&str], stdin: &str) -> Result<Output> {
    run_toml_release(&self.spec, args, stdin)
  }

  /// Read a file from the spec repository
  pub fn read_spec(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.spec.join(path))?)
  }

  /// Read a file from the website repository
  pub fn read_website(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.website.join(path))?)
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run git and return its trimmed stdout
pub fn git_stdout(cwd: &Path, args: &[&str]) -> Result<String> {
  let output = git(cwd, args)?;
  Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Tag names in a repository (bare or not)
pub fn tags(repo: &Path) -> Result<Vec<String>> {
  Ok(
    git_stdout(repo, &["tag", "--list"])?
      .lines()
      .map(String::from)
      .collect(),
  )
}

/// Subject of the commit `rev` resolves to
pub fn subject(repo: &Path, rev: &str) -> Result<String> {
  git_stdout(repo, &["log", "-1", "--format=%s", rev])
}

/// Run the toml-release binary without checking its exit status
pub fn run_toml_release(cwd: &Path, args: &[&str], stdin: &str) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_toml-release");

  let mut child = Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .context("Failed to run toml-release")?;

  // The child may exit before reading stdin; a broken pipe is fine then
  if let Some(mut input) = child.stdin.take() {
    let _ = input.write_all(stdin.as_bytes());
  }

  child.wait_with_output().context("Failed to wait for toml-release")
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}

fn path_str(path: &Path) -> Result<&str> {
  path
    .to_str()
    .with_context(|| format!("Non UTF-8 path: {}", path.display()))
}
