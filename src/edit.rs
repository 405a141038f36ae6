//! Literal line replacement
//!
//! `replace_lines` is the pure rewrite; `change_line` applies it to a file by
//! writing a sibling temporary file and renaming it over the original, so the
//! original is never left half-written.
//!
//! A line matches only when its content equals the literal exactly and it is
//! terminated by `\n`. Nothing is trimmed and nothing is pattern-matched.

use crate::core::error::{ReleaseResult, ResultExt};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Rewritten text and the number of lines that matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
  pub text: String,
  pub matches: usize,
}

/// Replace every line equal to `line` with `replacements`, one per line
pub fn replace_lines<S: AsRef<str>>(content: &str, line: &str, replacements: &[S]) -> Rewrite {
  let mut text = String::with_capacity(content.len());
  let mut matches = 0;

  for got in content.split_inclusive('\n') {
    if got.strip_suffix('\n') != Some(line) {
      text.push_str(got);
      continue;
    }

    matches += 1;
    for replacement in replacements {
      text.push_str(replacement.as_ref());
      text.push('\n');
    }
  }

  Rewrite { text, matches }
}

/// Apply `replace_lines` to a file in place, keeping its permission bits
///
/// Returns the number of replaced lines. Zero matches is not an error; the
/// file is rewritten with identical bytes.
pub fn change_line<S: AsRef<str>>(path: &Path, line: &str, replacements: &[S]) -> ReleaseResult<usize> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  let permissions = fs::metadata(path)
    .with_context(|| format!("Failed to stat {}", path.display()))?
    .permissions();

  let rewrite = replace_lines(&content, line, replacements);

  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };
  let mut tmp = NamedTempFile::new_in(dir).with_context(|| format!("Failed to create a temporary file in {}", dir.display()))?;
  tmp
    .write_all(rewrite.text.as_bytes())
    .with_context(|| format!("Failed to write rewritten {}", path.display()))?;
  tmp.as_file().sync_all()?;
  fs::set_permissions(tmp.path(), permissions)?;
  tmp.persist(path)?;

  Ok(rewrite.matches)
}
