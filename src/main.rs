mod checks;
mod commands;
mod core;
mod edit;
mod release;
mod ui;

use clap::Parser;
use core::error::{ExitCode, ReleaseError};
use ui::log::Logger;

/// Release a new version of the TOML specification
///
/// Run from the spec repository, with the website repository cloned next to
/// it. Both repositories are checked, the release is committed and tagged
/// locally, and everything is pushed once you confirm.
#[derive(Parser)]
#[command(name = "toml-release")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Version to release (semver, no build metadata), e.g. 1.0.0 or 1.1.0-rc.1
  #[arg(value_name = "VERSION")]
  release_version: String,
}

fn get_styles() -> clap::builder::Styles {
  use anstyle::{AnsiColor, Color, Style};

  let fg = |color: AnsiColor| Style::new().fg_color(Some(Color::Ansi(color)));
  clap::builder::Styles::styled()
    .header(fg(AnsiColor::Cyan).bold())
    .usage(fg(AnsiColor::Cyan).bold())
    .literal(fg(AnsiColor::Green).bold())
    .placeholder(fg(AnsiColor::Blue))
    .valid(fg(AnsiColor::Green))
    .invalid(fg(AnsiColor::Red).bold())
    .error(fg(AnsiColor::Red).bold())
}

fn main() {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    // Bad arguments are usage errors like an invalid version
    Err(err) if err.use_stderr() => {
      let _ = err.print();
      std::process::exit(ExitCode::User.as_i32());
    }
    Err(err) => err.exit(),
  };
  let log = Logger::new();

  if let Err(err) = commands::run_release(&log, &cli.release_version) {
    handle_error(&log, err);
  }
}

fn handle_error(log: &Logger, err: ReleaseError) -> ! {
  // Already reported inside the failing task
  if !matches!(err, ReleaseError::Aborted) {
    log.report(&err);
  }
  std::process::exit(err.exit_code().as_i32());
}
