//! Release preconditions for a repository
//!
//! A repository is releasable when, checked in this order:
//!
//! - **upstream**: `remote.upstream.url` is `git@github.com:<org>/<name>.git`
//! - **branch**: the current branch is `main` or `master`
//! - **clean**: `git status --porcelain` reports nothing
//! - **up to date**: after updating `upstream`, the local branch is neither
//!   ahead of nor behind `upstream/<branch>`
//!
//! The first failing check aborts the release. Nothing is retried.

mod repository;

pub use repository::{ORIGIN_REMOTE, RepoHandle, UPSTREAM_REMOTE, inspect_repository};
