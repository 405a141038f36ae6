//! Indented progress output
//!
//! Every task section logs `<message>...` and indents everything logged while
//! it runs by two spaces. Depth is restored by a guard, so early returns and
//! errors never leave the indentation behind.

use crate::core::error::{ReleaseError, ReleaseResult};
use anstyle::{AnsiColor, Color, Style};
use std::cell::Cell;
use std::io::IsTerminal;

const INDENT: &str = "  ";

/// Console logger carrying the current task depth
#[derive(Debug)]
pub struct Logger {
  depth: Cell<usize>,
  color: bool,
}

impl Logger {
  /// Logger that colours errors when stdout is a terminal
  pub fn new() -> Self {
    Self {
      depth: Cell::new(0),
      color: std::io::stdout().is_terminal(),
    }
  }

  /// Logger that never emits escape codes
  pub fn plain() -> Self {
    Self {
      depth: Cell::new(0),
      color: false,
    }
  }

  /// Current task depth
  pub fn depth(&self) -> usize {
    self.depth.get()
  }

  /// Progress message on stdout
  pub fn info(&self, message: &str) {
    println!("{}", indent(message, self.depth()));
  }

  /// Error message on stderr, red when stdout is a terminal
  pub fn error(&self, message: &str) {
    let output = indent(message, self.depth());
    if self.color {
      let style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));
      eprintln!("{}{}{}", style.render(), output, style.render_reset());
    } else {
      eprintln!("{}", output);
    }
  }

  /// Report an error: command diagnostics (if any), the `ERROR:` line, help
  pub fn report(&self, err: &ReleaseError) {
    if let ReleaseError::Command(cmd) = err {
      self.info(&cmd.diagnostics());
    }
    self.error(&format!("ERROR: {}", err));
    if let Some(help) = err.help_message() {
      self.error(&format!("Help: {}", help));
    }
  }

  /// Increase depth until the returned guard is dropped
  pub fn indented(&self) -> IndentGuard<'_> {
    self.depth.set(self.depth.get() + 1);
    IndentGuard { depth: &self.depth }
  }

  /// Run one task section
  ///
  /// Usage, precondition and command failures are reported here, inside the
  /// section's indentation, and come back as `ReleaseError::Aborted` so outer
  /// sections pass them through untouched. Other errors propagate as-is.
  pub fn task<T, F>(&self, message: &str, step: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> ReleaseResult<T>,
  {
    self.info(&format!("{}...", message));
    let _guard = self.indented();

    match step() {
      Err(err) if err.is_fatal_assertion() => {
        self.report(&err);
        Err(ReleaseError::Aborted)
      }
      other => other,
    }
  }
}

/// Restores the logger depth on drop
pub struct IndentGuard<'a> {
  depth: &'a Cell<usize>,
}

impl Drop for IndentGuard<'_> {
  fn drop(&mut self) {
    self.depth.set(self.depth.get().saturating_sub(1));
  }
}

/// Prefix every line that is not whitespace-only with `depth` indents
fn indent(message: &str, depth: usize) -> String {
  if depth == 0 {
    return message.to_string();
  }

  let prefix = INDENT.repeat(depth);
  message
    .split_inclusive('\n')
    .map(|line| {
      if line.trim().is_empty() {
        line.to_string()
      } else {
        format!("{}{}", prefix, line)
      }
    })
    .collect()
}
