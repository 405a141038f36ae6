//! Blocking confirmation before anything leaves the machine

use crate::core::error::{ReleaseError, ReleaseResult};
use std::io::{self, BufRead, Write};

/// Print `message` and block until the operator sends a line on stdin
pub fn wait_for_enter(message: &str) -> ReleaseResult<()> {
  let stdin = io::stdin();
  let stdout = io::stdout();
  confirm(&mut stdin.lock(), &mut stdout.lock(), message)
}

/// Any line (even an empty one) confirms; end of input cancels
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> ReleaseResult<()> {
  write!(output, "{} ", message)?;
  output.flush()?;

  let mut line = String::new();
  if input.read_line(&mut line)? == 0 {
    writeln!(output)?;
    return Err(ReleaseError::with_help(
      "No confirmation received, stopping before publishing",
      "Local commits and tags are in place; push them manually or reset to the backup tag",
    ));
  }

  Ok(())
}
