//! Core building blocks for toml-release
//!
//! - **config**: Release layout (names and paths) with optional release.toml overrides
//! - **context**: Shared state for one run (logger, layout, repository roots)
//! - **error**: Error types with contextual help messages and exit codes
//! - **vcs**: Git operations through the system `git` binary

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
