//! Error types for toml-release with contextual messages and exit codes
//!
//! Every failure aborts the release. The categories only decide how the
//! failure is reported and which exit code the process ends with.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for toml-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Usage errors, failed preconditions, failed git commands
  User = 1,
  /// I/O and environment failures
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for toml-release
#[derive(Debug)]
pub enum ReleaseError {
  /// Invalid invocation (bad version string)
  Usage(UsageError),

  /// A repository is not in a releasable state
  Precondition(PreconditionError),

  /// A git command exited with a non-zero status
  Command(CommandError),

  /// release.toml problems
  Config(ConfigError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },

  /// The failure was already reported at a task boundary
  Aborted,
}

impl ReleaseError {
  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaseError::Io(err) => ReleaseError::Message {
        message: ctx_str,
        context: Some(err.to_string()),
        help: None,
      },
      _ => self,
    }
  }

  /// Whether this error ends the run with a formatted `ERROR:` line at the
  /// task where it happened.
  pub fn is_fatal_assertion(&self) -> bool {
    matches!(
      self,
      ReleaseError::Usage(_) | ReleaseError::Precondition(_) | ReleaseError::Command(_)
    )
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Usage(_) => ExitCode::User,
      ReleaseError::Precondition(_) => ExitCode::User,
      ReleaseError::Command(_) => ExitCode::User,
      ReleaseError::Config(_) => ExitCode::User,
      ReleaseError::Aborted => ExitCode::User,
      ReleaseError::Io(_) => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::System,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Usage(e) => e.help_message(),
      ReleaseError::Precondition(e) => e.help_message(),
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Usage(e) => write!(f, "{}", e),
      ReleaseError::Precondition(e) => write!(f, "{}", e),
      ReleaseError::Command(e) => write!(f, "{}", e),
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
      ReleaseError::Aborted => write!(f, "Release aborted"),
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<UsageError> for ReleaseError {
  fn from(err: UsageError) -> Self {
    ReleaseError::Usage(err)
  }
}

impl From<PreconditionError> for ReleaseError {
  fn from(err: PreconditionError) -> Self {
    ReleaseError::Precondition(err)
  }
}

impl From<CommandError> for ReleaseError {
  fn from(err: CommandError) -> Self {
    ReleaseError::Command(err)
  }
}

impl From<ConfigError> for ReleaseError {
  fn from(err: ConfigError) -> Self {
    ReleaseError::Config(err)
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::Config(ConfigError::Parse {
      reason: err.to_string(),
    })
  }
}

impl From<tempfile::PersistError> for ReleaseError {
  fn from(err: tempfile::PersistError) -> Self {
    ReleaseError::Io(err.error)
  }
}

/// Invalid invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
  /// Not a semver.org version string
  InvalidVersion { version: String },

  /// Valid semver, but carries `+build` metadata
  BuildMetadata { version: String },
}

impl UsageError {
  fn help_message(&self) -> Option<String> {
    match self {
      UsageError::InvalidVersion { .. } => {
        Some("Pass a version such as 1.0.0 or 1.1.0-rc.1 (see https://semver.org).".to_string())
      }
      UsageError::BuildMetadata { version } => version
        .split_once('+')
        .map(|(release, _)| format!("Drop the build metadata, e.g. `toml-release {}`.", release)),
    }
  }
}

impl fmt::Display for UsageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      UsageError::InvalidVersion { version } => {
        write!(f, "Given version is not a valid semver: {}", version)
      }
      UsageError::BuildMetadata { version } => {
        write!(f, "Shouldn't have build metadata in version: {}", version)
      }
    }
  }
}

/// A repository failed one of the release preconditions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
  /// Path is not inside a git work tree
  RepoNotFound { path: PathBuf },

  /// `upstream` remote points somewhere else
  IncorrectUpstream { url: String },

  /// Not on the default branch
  UnexpectedBranch { branch: String },

  /// `git status --porcelain` reported something
  DirtyWorkingDirectory { status: String },

  /// Local branch is ahead of, behind, or diverged from upstream
  DeviatesFromUpstream { deviation: String },
}

impl PreconditionError {
  fn help_message(&self) -> Option<String> {
    match self {
      PreconditionError::RepoNotFound { path } => Some(format!(
        "Run from the root of the spec repository with the website repository cloned at {}",
        path.display()
      )),
      _ => None,
    }
  }
}

impl fmt::Display for PreconditionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PreconditionError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      PreconditionError::IncorrectUpstream { url } => {
        write!(f, "Got incorrect upstream repo: {}", url)
      }
      PreconditionError::UnexpectedBranch { branch } => {
        if branch.is_empty() {
          write!(f, "Not on a branch (detached HEAD)")
        } else {
          write!(f, "Not on the default branch: {}", branch)
        }
      }
      PreconditionError::DirtyWorkingDirectory { status } => {
        write!(f, "Dirty working directory\n{}", status)
      }
      PreconditionError::DeviatesFromUpstream { deviation } => {
        write!(f, "Local branch deviates from upstream\n{}", deviation)
      }
    }
  }
}

/// A git command exited with a non-zero status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
  /// Command line as the operator would type it
  pub command: String,
  /// Exit code, `None` when killed by a signal
  pub code: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl CommandError {
  /// The command line followed by both captured streams, for diagnosis
  pub fn diagnostics(&self) -> String {
    let stream = |text: &str| {
      let text = text.trim_end_matches('\n');
      if text.is_empty() {
        "<nothing>".to_string()
      } else {
        text.to_string()
      }
    };

    [
      format!("$ {}", self.command),
      format!("{:-^80}", " stdout "),
      stream(&self.stdout),
      format!("{:-^80}", " stderr "),
      stream(&self.stderr),
    ]
    .join("\n")
  }
}

impl fmt::Display for CommandError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.code {
      Some(code) => write!(f, "Exited with non-zero exit code: {}", code),
      None => write!(f, "Terminated by signal: {}", self.command),
    }
  }
}

/// release.toml errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
  /// File could not be deserialized
  Parse { reason: String },

  /// A field holds a value the recipe cannot use
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Parse { .. } => Some("Remove release.toml to use the built-in toml-lang layout.".to_string()),
      ConfigError::InvalidField { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Parse { reason } => write!(f, "Failed to parse release.toml: {}", reason),
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid `{}` in release.toml: {}", field, reason)
      }
    }
  }
}

/// Result type alias for toml-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}
