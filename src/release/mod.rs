//! Release recipe
//!
//! # Steps
//!
//! 1. Validate the version (`version`)
//! 2. Prepare locally (`prepare`): backup tags, changelog release commit,
//!    release tag, changelog development commit, website document commit
//! 3. Publish (`publish`): push both repositories to `origin` and `upstream`
//!
//! # Recovery
//!
//! There is no automated rollback. Every run starts by tagging both
//! repositories with `backup/<unix-timestamp>`; reset to that tag to undo a
//! partial release, then run again.

pub mod changelog;
pub mod prepare;
pub mod publish;
pub mod version;

pub use version::ReleaseVersion;
